/// Full-screen art shown while the easter egg is active.
pub const ART: &[&str] = &[
    "",
    "                 _                                                ",
    "        ___  ___| |__   ___ _ __ ___   __ _ ___  ___ ___  _ __   ___ ",
    "       / __|/ __| '_ \\ / _ \\ '_ ` _ \\ / _` / __|/ __/ _ \\| '_ \\ / _ \\",
    "       \\__ \\ (__| | | |  __/ | | | | | (_| \\__ \\ (_| (_) | |_) |  __/",
    "       |___/\\___|_| |_|\\___|_| |_| |_|\\__,_|___/\\___\\___/| .__/ \\___|",
    "                                                         |_|         ",
    "",
    "                    .-------------.        .-------------.",
    "                    |   schemas   |------->|   tables    |",
    "                    '-------------'        '------+------'",
    "                                                  |",
    "                          .-----------------------+-----------------------.",
    "                          |                       |                       |",
    "                   .------+------.         .------+------.         .------+------.",
    "                   |   columns   |         |   indexes   |         | foreign keys|",
    "                   '-------------'         '-------------'         '-------------'",
    "",
    "                              press any key to go back",
];

/// The leading rows of the art that fit in `height` lines.
pub fn clip_art(height: u16) -> &'static [&'static str] {
    let rows = usize::from(height).min(ART.len());
    &ART[..rows]
}
