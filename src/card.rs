//! Card rendering: template substitution and headless-browser rasterization.
//!
//! The layout lives entirely in the HTML template; this module only fills in
//! the placeholder tokens and screenshots the populated document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};

use crate::company::CompanyRequest;

pub const CARD_WIDTH: u32 = 1024;
pub const CARD_HEIGHT: u32 = 1536;

/// 1x1 transparent GIF, substituted when no company logo was found.
const TRANSPARENT_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAAAAACH5BAEKAAEALAAAAAABAAEAAAICTAEAOw==";

/// Inline SVG dog emoji, substituted when the mascot image file is missing.
const SHIBA_FALLBACK: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAxMDAgMTAwIj48dGV4dCB5PSI3NSIgZm9udC1zaXplPSI4MCI+8J+YiTwvdGV4dD48L3N2Zz4=";

/// Escape text for literal inclusion in the HTML template.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Load the mascot image as a base64 data URL, falling back to an inline
/// emoji when the file is missing.
pub fn shiba_data_url(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => format!("data:image/png;base64,{}", BASE64.encode(bytes)),
        Err(_) => {
            tracing::warn!(path = %path.display(), "Mascot image not found, using emoji fallback");
            SHIBA_FALLBACK.to_string()
        }
    }
}

/// Substitute the template placeholders. Text fields are HTML-escaped; the
/// logo slot gets a transparent pixel when no logo was found.
pub fn populate_template(
    template: &str,
    req: &CompanyRequest,
    roast_text: &str,
    shiba_data_url: &str,
    logo_url: Option<&str>,
) -> String {
    template
        .replace("{{COMPANY_NAME}}", &escape_html(&req.name))
        .replace("{{ROLE}}", &escape_html(&req.role))
        .replace("{{ROAST_TEXT}}", &escape_html(roast_text))
        .replace("{{SHIBA_IMAGE}}", shiba_data_url)
        .replace("{{COMPANY_LOGO}}", logo_url.unwrap_or(TRANSPARENT_GIF))
        .replace("{{HAS_LOGO}}", if logo_url.is_some() { "true" } else { "false" })
}

/// Rasterize the populated document to PNG bytes at 2x pixel density.
///
/// Blocking: drives a headless Chrome instance. Call through
/// `tokio::task::spawn_blocking` from async contexts.
pub fn render_card(html: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(false)
        .window_size(Some((width, height)))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to configure browser: {e}"))?;
    let browser = Browser::new(options).context("Failed to launch headless browser")?;
    let tab = browser.new_tab()?;

    // The tab needs a navigable document, so stage the HTML in a temp file.
    let staged = std::env::temp_dir().join(format!("talcard-{}.html", epoch_ms()));
    std::fs::write(&staged, html).context("Failed to stage card HTML")?;

    let result = (|| {
        tab.navigate_to(&format!("file://{}", staged.display()))?;
        tab.wait_until_navigated()?;
        // Give the remote logo image a moment to arrive before the shot.
        std::thread::sleep(std::time::Duration::from_millis(500));

        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
            scale: 2.0,
        };
        tab.capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)
    })();

    let _ = std::fs::remove_file(&staged);
    result.context("Failed to render card")
}

/// Write the PNG to `<out_dir>/card-<sanitized>-<epoch_ms>.png`, creating the
/// output directory if needed.
pub fn save_card(png: &[u8], company_name: &str, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let filename = format!("card-{}-{}.png", sanitize_name(company_name), epoch_ms());
    let path = out_dir.join(filename);
    std::fs::write(&path, png).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn epoch_ms() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<html><body>
        <h1>{{COMPANY_NAME}} — {{ROLE}}</h1>
        <p>{{ROAST_TEXT}}</p>
        <img src="{{SHIBA_IMAGE}}">
        <img src="{{COMPANY_LOGO}}" data-has-logo="{{HAS_LOGO}}">
    </body></html>"#;

    #[test]
    fn html_escaping_covers_special_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#039;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn template_substitution_with_logo() {
        let req = CompanyRequest::new("Google", "Engineers");
        let html = populate_template(
            TEMPLATE,
            &req,
            "A roast & a half",
            "data:image/png;base64,AAAA",
            Some("https://img.logo.dev/google.com?token=t"),
        );
        assert!(html.contains("Google — Engineers"));
        assert!(html.contains("A roast &amp; a half"));
        assert!(html.contains("https://img.logo.dev/google.com?token=t"));
        assert!(html.contains(r#"data-has-logo="true""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn template_substitution_without_logo() {
        let req = CompanyRequest::new("Acme", "");
        let html = populate_template(TEMPLATE, &req, "roast", "data:,", None);
        assert!(html.contains(TRANSPARENT_GIF));
        assert!(html.contains(r#"data-has-logo="false""#));
    }

    #[test]
    fn company_text_is_escaped_in_template() {
        let req = CompanyRequest::new("<script>", "Engineers");
        let html = populate_template(TEMPLATE, &req, "roast", "data:,", None);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn saved_card_filename_is_sanitized_and_timestamped() {
        let out_dir = std::env::temp_dir().join(format!("talcard-test-{}", epoch_ms()));
        let path = save_card(b"png-bytes", "Foo Bar!", &out_dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("card-foo-bar--"), "unexpected name {name}");
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
        let _ = std::fs::remove_dir_all(&out_dir);
    }

    #[test]
    fn missing_mascot_falls_back_to_inline_emoji() {
        let url = shiba_data_url(Path::new("/nonexistent/shiba.png"));
        assert!(url.starts_with("data:image/svg+xml;base64,"));
    }
}
