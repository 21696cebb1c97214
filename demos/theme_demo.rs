//! Interactive-ish tour of the theme store.
//!
//! Builds a store over file-backed persistence and a hand-driven
//! color-scheme signal, then walks through preference changes and a
//! simulated OS theme flip, repainting a styled banner on every
//! resolved-mode change.
//!
//! Run with: `cargo run --example theme_demo`

use console::Style;
use duotone::{ColorMode, ManualSignal, Preference, ThemeBinding, ThemeStore};

fn banner(mode: ColorMode) -> String {
    let style = match mode {
        ColorMode::Light => Style::new().black().on_white(),
        ColorMode::Dark => Style::new().white().on_black(),
    };
    style.apply_to(format!(" duotone · {mode} mode ")).to_string()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duotone=debug".into()),
        )
        .init();

    let signal = ManualSignal::new(ColorMode::Light);
    let store = ThemeStore::builder().signal(signal.clone()).build();

    println!("{}", banner(store.resolved()));
    store
        .on_resolved_change(|mode| println!("{}", banner(mode)))
        .leak();

    let binding = ThemeBinding::attach(&store);

    println!("\n-- user picks dark --");
    binding.set_theme(Preference::Dark);

    println!("\n-- user picks system (OS currently light) --");
    binding.set_theme(Preference::System);

    println!("\n-- OS switches to dark --");
    signal.set(ColorMode::Dark);

    println!("\n-- user pins light --");
    binding.set_theme(Preference::Light);

    println!("\n-- OS flips back; pinned preference, so no repaint --");
    signal.set(ColorMode::Light);

    println!(
        "\nfinal: preference={} resolved={}",
        binding.preference(),
        binding.resolved()
    );
}
