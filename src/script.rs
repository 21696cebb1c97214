//! Pre-paint theme script generation.
//!
//! A page that waits for the full theme machinery to load will paint one
//! frame in the wrong theme first. [`theme_script`] produces a
//! self-contained snippet meant to be inlined ahead of any stylesheet or
//! component: it reads the persisted preference, resolves it against the
//! `prefers-color-scheme` media query, and stamps the resolved mode onto
//! the document root. [`forced_theme_script`] is the variant for pages
//! that pin one mode regardless of preference.
//!
//! Snippets are rendered from minijinja templates driven by the same
//! [`ThemeOptions`] the live store uses, and every embedded literal is
//! JSON-encoded, so a storage key or attribute name can never break out
//! of its JS string.

use minijinja::{context, Environment};
use thiserror::Error;

use crate::store::ThemeOptions;
use crate::theme::ColorMode;

// The r=... conditional must stay in lockstep with Preference::resolve.
const APPLY_TEMPLATE: &str = r#"(function(){try{var d=document.documentElement;var p=null;try{p=localStorage.getItem({{ key }})}catch(e){}if(p!=="light"&&p!=="dark"&&p!=="system"){p={{ default }};}var dark=false;try{dark=window.matchMedia("(prefers-color-scheme: dark)").matches}catch(e){}var r=p==="system"?(dark?"dark":"light"):p;{% if update_class %}d.classList.remove("light","dark");d.classList.add(r);{% endif %}{% if attr %}d.setAttribute({{ attr }},r);{% endif %}{% if color_scheme %}d.style.colorScheme=r;{% endif %}}catch(e){}})()"#;

const FORCED_TEMPLATE: &str = r#"(function(){try{var d=document.documentElement;var r={{ mode }};{% if update_class %}d.classList.remove("light","dark");d.classList.add(r);{% endif %}{% if attr %}d.setAttribute({{ attr }},r);{% endif %}{% if color_scheme %}d.style.colorScheme=r;{% endif %}}catch(e){}})()"#;

/// Error from snippet rendering.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Template rendering failed.
    #[error("failed to render theme script: {0}")]
    Render(#[from] minijinja::Error),

    /// A literal could not be JSON-encoded for embedding.
    #[error("failed to encode script literal: {0}")]
    Encode(#[from] serde_json::Error),
}

fn render(template: &str, ctx: minijinja::Value) -> Result<String, ScriptError> {
    let mut env = Environment::new();
    env.add_template("script", template)?;
    Ok(env.get_template("script")?.render(ctx)?)
}

/// Renders the pre-paint snippet for `options`.
///
/// The snippet is a single self-contained IIFE with no external
/// references. Storage or media-query failures inside it are swallowed,
/// mirroring the live store's degraded paths: the root always ends up
/// marked with a valid light/dark value.
///
/// # Example
///
/// ```rust
/// use duotone::{theme_script, ThemeOptions};
///
/// let script = theme_script(&ThemeOptions::new()).unwrap();
/// assert!(script.contains(r#"localStorage.getItem("theme")"#));
/// ```
pub fn theme_script(options: &ThemeOptions) -> Result<String, ScriptError> {
    let key = serde_json::to_string(&options.storage_key)?;
    let default = serde_json::to_string(options.default_preference.as_str())?;
    let attr = options
        .data_attribute
        .as_ref()
        .map(|attr| serde_json::to_string(attr))
        .transpose()?;
    render(
        APPLY_TEMPLATE,
        context! {
            key => key,
            default => default,
            update_class => options.update_class,
            attr => attr,
            color_scheme => options.color_scheme,
        },
    )
}

/// Renders a snippet that applies `mode` unconditionally.
///
/// No storage read, no media query: for pages that force one theme
/// (print views, embeds) while the rest of the site stays adaptive.
pub fn forced_theme_script(mode: ColorMode, options: &ThemeOptions) -> Result<String, ScriptError> {
    let mode = serde_json::to_string(mode.as_str())?;
    let attr = options
        .data_attribute
        .as_ref()
        .map(|attr| serde_json::to_string(attr))
        .transpose()?;
    render(
        FORCED_TEMPLATE,
        context! {
            mode => mode,
            update_class => options.update_class,
            attr => attr,
            color_scheme => options.color_scheme,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Preference;

    #[test]
    fn test_script_embeds_storage_key_and_default() {
        let options = ThemeOptions::new()
            .with_storage_key("acme-theme")
            .with_default_preference(Preference::Dark);
        let script = theme_script(&options).unwrap();

        assert!(script.contains(r#"localStorage.getItem("acme-theme")"#));
        assert!(script.contains(r#"p="dark";"#));
    }

    #[test]
    fn test_script_validates_against_the_three_preferences() {
        let script = theme_script(&ThemeOptions::new()).unwrap();
        assert!(script.contains(r#"p!=="light"&&p!=="dark"&&p!=="system""#));
    }

    #[test]
    fn test_script_resolution_mirrors_preference_resolve() {
        let script = theme_script(&ThemeOptions::new()).unwrap();

        // The JS side: system defers to the media query, pinned values
        // pass through.
        assert!(script.contains(r#"var r=p==="system"?(dark?"dark":"light"):p;"#));

        // The Rust side of the same formula.
        for system in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(Preference::System.resolve(system), system);
            assert_eq!(Preference::Light.resolve(system), ColorMode::Light);
            assert_eq!(Preference::Dark.resolve(system), ColorMode::Dark);
        }
    }

    #[test]
    fn test_script_is_self_contained() {
        let script = theme_script(&ThemeOptions::new()).unwrap();
        assert!(script.starts_with("(function(){"));
        assert!(script.ends_with("})()"));
        assert!(!script.contains('\n'));
    }

    #[test]
    fn test_markers_follow_options() {
        let all = theme_script(
            &ThemeOptions::new().with_data_attribute("data-theme"),
        )
        .unwrap();
        assert!(all.contains(r#"d.classList.add(r)"#));
        assert!(all.contains(r#"d.setAttribute("data-theme",r)"#));
        assert!(all.contains("d.style.colorScheme=r"));

        let bare = theme_script(
            &ThemeOptions::new()
                .with_update_class(false)
                .with_color_scheme(false),
        )
        .unwrap();
        assert!(!bare.contains("classList"));
        assert!(!bare.contains("setAttribute"));
        assert!(!bare.contains("colorScheme"));
    }

    #[test]
    fn test_storage_key_is_json_escaped() {
        let options = ThemeOptions::new().with_storage_key(r#"weird"key"#);
        let script = theme_script(&options).unwrap();
        assert!(script.contains(r#"localStorage.getItem("weird\"key")"#));
    }

    #[test]
    fn test_forced_script_skips_storage() {
        let script =
            forced_theme_script(ColorMode::Dark, &ThemeOptions::new()).unwrap();
        assert!(!script.contains("localStorage"));
        assert!(!script.contains("matchMedia"));
        assert!(script.contains(r#"var r="dark";"#));
        assert!(script.contains("d.classList.add(r)"));
    }
}
