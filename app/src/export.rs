//! Local serialize-to-file export of finished artifacts. No network.

use crate::artifact::RenderedImage;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Default filename for an exported chart.
pub const CHART_FILENAME: &str = "accountability-chart.svg";
/// Default filename for an exported document.
pub const DOCUMENT_FILENAME: &str = "accountability-document.txt";

/// Write the rendered image as an `image/svg+xml` file.
pub fn export_svg(image: &RenderedImage, path: &Path) -> io::Result<()> {
    fs::write(path, image.vector_markup.as_bytes())?;
    info!(path = %path.display(), "exported chart");
    Ok(())
}

/// Write a generated document as a `text/plain` file.
pub fn export_text(body: &str, path: &Path) -> io::Result<()> {
    fs::write(path, body.as_bytes())?;
    info!(path = %path.display(), "exported document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("accuchart-export-{}-{name}", std::process::id()))
    }

    #[test]
    fn export_is_idempotent_for_an_unchanged_artifact() {
        let image = RenderedImage {
            vector_markup: "<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>".to_string(),
        };
        let path = tmp_path("idempotent.svg");

        export_svg(&image, &path).unwrap();
        let first = fs::read(&path).unwrap();
        export_svg(&image, &path).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, image.vector_markup.as_bytes());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn text_export_writes_the_body_verbatim() {
        let path = tmp_path("doc.txt");
        export_text("# 책무구조도\n내용", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# 책무구조도\n내용");
        fs::remove_file(&path).ok();
    }
}
