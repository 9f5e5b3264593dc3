//! Post-processing of the static export for hosting under a sub-path.

use anyhow::Context;
use showroom_core::{models::escape_html, SiteConfig};
use std::path::{Path, PathBuf};

pub const NOJEKYLL_FILE: &str = ".nojekyll";
pub const NOT_FOUND_FILE: &str = "404.html";

/// Files written by `write_export_fixups`
#[derive(Debug, Clone)]
pub struct ExportFixups {
    pub nojekyll: PathBuf,
    pub not_found: PathBuf,
}

/// Redirect page sending unknown paths back to the site root.
pub fn not_found_page(config: &SiteConfig) -> String {
    let target = config.route("/");
    let escaped = escape_html(&target);
    // JSON string literal with `<` escaped so it cannot close the script element
    let script_target = serde_json::Value::String(target.clone())
        .to_string()
        .replace('<', "\\u003c");
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Redirecting</title>
    <meta http-equiv="refresh" content="0; url={escaped}">
    <script>window.location.replace({script_target});</script>
  </head>
  <body>
    <a href="{escaped}">Continue to the showroom</a>
  </body>
</html>
"#
    )
}

/// Write the `.nojekyll` marker and the `404.html` redirect into `dir`.
/// Existing files are overwritten.
#[tracing::instrument(skip(dir, config), fields(dir = %dir.display(), base_path = %config.base_path))]
pub async fn write_export_fixups(dir: &Path, config: &SiteConfig) -> anyhow::Result<ExportFixups> {
    let metadata = tokio::fs::metadata(dir)
        .await
        .with_context(|| format!("Export directory {} is not accessible", dir.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let nojekyll = dir.join(NOJEKYLL_FILE);
    tokio::fs::write(&nojekyll, b"")
        .await
        .with_context(|| format!("Failed to write {}", nojekyll.display()))?;

    let not_found = dir.join(NOT_FOUND_FILE);
    tokio::fs::write(&not_found, not_found_page(config))
        .await
        .with_context(|| format!("Failed to write {}", not_found.display()))?;

    tracing::info!("Export fixups written");
    Ok(ExportFixups {
        nojekyll,
        not_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::BuildEnvironment;

    fn production() -> SiteConfig {
        SiteConfig {
            environment: BuildEnvironment::Production,
            base_path: "/showroom".to_string(),
            asset_prefix: "/showroom".to_string(),
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    async fn test_writes_marker_and_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_export_fixups(dir.path(), &production()).await.unwrap();

        let marker = tokio::fs::read(&written.nojekyll).await.unwrap();
        assert!(marker.is_empty());

        let page = tokio::fs::read_to_string(&written.not_found).await.unwrap();
        assert!(page.contains(r#"content="0; url=/showroom/""#));
        assert!(page.contains(r#"window.location.replace("/showroom/")"#));
    }

    #[tokio::test]
    async fn test_development_redirects_to_root() {
        let page = not_found_page(&SiteConfig::default());
        assert!(page.contains(r#"url=/""#));
    }

    #[test]
    fn test_script_target_cannot_close_script() {
        let config = SiteConfig {
            base_path: r#"/a"</script><script>alert(1)//"#.to_string(),
            ..production()
        };
        let page = not_found_page(&config);
        assert_eq!(page.matches("</script>").count(), 1);
        assert!(page.contains(
            r#"window.location.replace("/a\"\u003c/script>\u003cscript>alert(1)///");"#
        ));
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("out");
        assert!(write_export_fixups(&missing, &production()).await.is_err());
    }
}
