//! Binary that emits command-line options markdown to stdout.
//!
//! Used by the docs build to refresh `docs/command-line-options.md`.

fn main() {
    print!("{}", plotpick_cli::render_options_markdown());
}
