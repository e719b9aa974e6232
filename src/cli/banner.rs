//! ASCII art banner shown on first shell integration install.

use std::io::IsTerminal;

/// ANSI true-color escape sequences for the banner palette.
struct Colors {
    frame: &'static str,
    title: &'static str,
    subtitle: &'static str,
    reset: &'static str,
}

const COLOR: Colors = Colors {
    frame: "\x1b[38;2;120;120;140m",  // Gray-blue
    title: "\x1b[1;38;2;72;187;120m", // Bold green
    subtitle: "\x1b[38;2;160;160;160m",
    reset: "\x1b[0m",
};

const PLAIN: Colors = Colors {
    frame: "",
    title: "",
    subtitle: "",
    reset: "",
};

/// Prints the sopsy banner to stdout.
///
/// Renders ANSI true-color when stdout is a terminal and `NO_COLOR` is
/// unset, falls back to plain text otherwise.
pub fn print_banner() {
    let c = if std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err() {
        &COLOR
    } else {
        &PLAIN
    };

    let fr = c.frame;
    let tt = c.title;
    let st = c.subtitle;
    let r = c.reset;

    println!(
        r#"
{fr}  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓{r}
{fr}  ┃{r}                                                   {fr}┃{r}
{fr}  ┃{r}   {tt}███████  ██████  ██████  ███████ ██    ██{r}      {fr}┃{r}
{fr}  ┃{r}   {tt}██      ██    ██ ██   ██ ██       ██  ██{r}       {fr}┃{r}
{fr}  ┃{r}   {tt}███████ ██    ██ ██████  ███████   ████{r}        {fr}┃{r}
{fr}  ┃{r}   {tt}     ██ ██    ██ ██           ██    ██{r}         {fr}┃{r}
{fr}  ┃{r}   {tt}███████  ██████  ██      ███████    ██{r}         {fr}┃{r}
{fr}  ┃{r}                                                   {fr}┃{r}
{fr}  ┃{r}   {st}SOPS Profile Manager{r}                            {fr}┃{r}
{fr}  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛{r}
"#
    );
}
