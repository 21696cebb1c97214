//! Emits a self-contained HTML page demonstrating the flash-free
//! startup script, the typography wrapper, and reader adjustments.
//!
//! Run with: `cargo run --example typeset_page > page.html`

use duotone::{theme_script, ThemeOptions, Typography, TypographyAdjustments};

fn main() {
    let options = ThemeOptions::new().with_data_attribute("data-theme");
    let script = match theme_script(&options) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("script generation failed: {err}");
            std::process::exit(1);
        }
    };

    let adjustments = TypographyAdjustments::new()
        .with_font_scale(105)
        .with_line_length(70);

    let article = Typography::new()
        .as_tag("article")
        .class("prose")
        .attr("style", adjustments.css())
        .child(Typography::new().as_tag("h1").text("Reading in the dark"))
        .child(
            Typography::new()
                .as_tag("p")
                .class("lead")
                .text("The theme below was applied before this paragraph ever painted."),
        )
        .child(Typography::new().as_tag("hr"))
        .child(
            Typography::new()
                .as_tag("p")
                .text("Toggle your OS color scheme and reload; no flash either way."),
        );

    println!("<!doctype html>");
    println!("<html>");
    println!("<head>");
    println!("<script>{script}</script>");
    println!("<style>");
    println!("  html[data-theme=\"dark\"] body {{ background: #111; color: #eee; }}");
    println!(
        "  .typography {{ font-size: var(--typography-font-size-base, 1rem); margin: 0 auto; }}"
    );
    println!("</style>");
    println!("</head>");
    println!("<body>");
    println!("{}", article.render());
    println!("</body>");
    println!("</html>");
}
