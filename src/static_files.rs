//! Serving the documentation viewer assets shipped next to the binary.
//!
//! `index.html` is treated as a minijinja template so the page can be pointed
//! at the document URL (`spec_url`) without editing the asset.

use minijinja::Environment;
use serde_json::Value as JsonValue;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    /// Map a URL path onto the base directory, refusing any component that
    /// would escape it.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "png" => "image/png",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }

    /// Full `Content-Type` header line for a MIME type produced by
    /// [`StaticFiles::load`]. The set is closed, so the line is static and
    /// needs no per-request allocation.
    pub fn content_type_header(content_type: &str) -> &'static str {
        match content_type {
            "text/html" => "Content-Type: text/html",
            "text/css" => "Content-Type: text/css",
            "application/javascript" => "Content-Type: application/javascript",
            "application/json" => "Content-Type: application/json",
            "image/png" => "Content-Type: image/png",
            "text/plain" => "Content-Type: text/plain",
            _ => "Content-Type: application/octet-stream",
        }
    }

    /// Load a file below the base directory. HTML files are rendered as
    /// templates when a context is supplied.
    pub fn load(
        &self,
        url_path: &str,
        ctx: Option<&JsonValue>,
    ) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        if path.extension().and_then(|s| s.to_str()) == Some("html") {
            if let Some(ctx_val) = ctx {
                let source = fs::read_to_string(&path)?;
                let mut env = Environment::new();
                env.add_template("page", &source)
                    .map_err(io::Error::other)?;
                let rendered = env
                    .get_template("page")
                    .map_err(io::Error::other)?
                    .render(ctx_val)
                    .map_err(io::Error::other)?;
                return Ok((rendered.into_bytes(), Self::content_type(&path)));
            }
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_map_path_prevents_traversal() {
        let sf = StaticFiles::new("docs-site");
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.map_path("../../etc/passwd").is_none());
        assert!(sf.map_path("index.html").is_some());
    }

    #[test]
    fn test_load_renders_index_with_spec_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs::File::create(dir.path().join("index.html")).unwrap();
        write!(f, "<script>url = \"{{{{ spec_url }}}}\";</script>").unwrap();

        let sf = StaticFiles::new(dir.path());
        let ctx = json!({ "spec_url": "/openapi.json" });
        let (bytes, ct) = sf.load("index.html", Some(&ctx)).unwrap();
        assert_eq!(ct, "text/html");
        assert!(String::from_utf8(bytes).unwrap().contains("/openapi.json"));
    }

    #[test]
    fn test_content_type_header_covers_the_closed_set() {
        assert_eq!(
            StaticFiles::content_type_header("text/html"),
            "Content-Type: text/html"
        );
        assert_eq!(
            StaticFiles::content_type_header("application/json"),
            "Content-Type: application/json"
        );
        assert_eq!(
            StaticFiles::content_type_header("application/x-unknown"),
            "Content-Type: application/octet-stream"
        );
    }

    #[test]
    fn test_load_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.css"), "body {}").unwrap();

        let sf = StaticFiles::new(dir.path());
        let (bytes, ct) = sf.load("app.css", None).unwrap();
        assert_eq!(ct, "text/css");
        assert_eq!(bytes, b"body {}");
    }
}
