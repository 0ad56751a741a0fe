pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
pub const RULE: &str = "----------------------------------------------------------------";
pub const BODY_INDENT: &str = "    ";

pub fn help_text() -> String {
    [
        "Commands:",
        "  key <api key>     set the API key (saved on every change)",
        "  url <video url>   set the video URL field",
        "  parse [url]       extract the recipe for the URL field (or the given URL)",
        "  retry <n>         run card #n again",
        "  toggle <n>        expand or collapse card #n",
        "  show              redraw all cards",
        "  help              this list",
        "  quit              leave",
    ]
    .join("\n")
}

pub fn welcome_text() -> String {
    [
        "Welcome to Recipe Video Parser",
        "Parse any recipe from TikTok, Instagram, or YouTube videos.",
        "Type `help` for the list of commands.",
    ]
    .join("\n")
}
