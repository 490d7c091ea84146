//! Right-to-left HTML output with an optional embedded font

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::dictionary::DictionaryStore;
use crate::translit::filter::NumericFilter;
use crate::translit::{read_stdin, transliterate};

const FALLBACK_FONTS: &str = "'Noto Naskh Arabic', 'Amiri', 'Scheherazade New', serif";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    #[error("invalid font family name: {0:?}")]
    InvalidFamily(String),

    #[error("unsupported font format: {}", .0.display())]
    UnsupportedFont(PathBuf),

    #[error("failed to read font {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct FontAsset {
    pub family: String,
    mime: &'static str,
    format: &'static str,
    data: String,
}

impl FontAsset {
    pub fn load<P: AsRef<Path>>(path: P, family: &str) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let family = family.trim();
        // The name is placed inside a quoted CSS string
        if family.is_empty() || family.contains(['\'', '"', '\\', ';', '{', '}', '<', '>']) {
            return Err(RenderError::InvalidFamily(family.to_string()));
        }
        if !path.exists() {
            return Err(RenderError::FontNotFound(path.to_path_buf()));
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let (mime, format) = match ext.as_str() {
            "ttf" => ("font/ttf", "truetype"),
            "otf" => ("font/otf", "opentype"),
            "woff" => ("font/woff", "woff"),
            "woff2" => ("font/woff2", "woff2"),
            _ => return Err(RenderError::UnsupportedFont(path.to_path_buf())),
        };

        let bytes = fs::read(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Embedding {} ({} bytes)", path.display(), bytes.len());

        Ok(Self {
            family: family.to_string(),
            mime,
            format,
            data: STANDARD.encode(bytes),
        })
    }

    fn font_face(&self) -> String {
        format!(
            "@font-face {{ font-family: '{}'; src: url(data:{};base64,{}) format('{}'); }}",
            self.family, self.mime, self.data, self.format
        )
    }
}

pub struct HtmlRenderer {
    font: Option<FontAsset>,
}

impl HtmlRenderer {
    pub fn new(font: Option<FontAsset>) -> Self {
        Self { font }
    }

    /// Font from CLI arg > config, none when neither is set.
    pub fn from_config(cfg: &Config, font: Option<&Path>) -> Result<Self> {
        let font = match cfg.font_path(font) {
            Some(path) => Some(
                FontAsset::load(&path, &cfg.render.font_family)
                    .context("Failed to load font for HTML output")?,
            ),
            None => None,
        };
        Ok(Self::new(font))
    }

    fn font_stack(&self) -> String {
        match &self.font {
            Some(font) => format!("'{}', {}", font.family, FALLBACK_FONTS),
            None => FALLBACK_FONTS.to_string(),
        }
    }

    /// Fragment: a `<style>` block and an RTL `<div>` with one `<p>` per line.
    pub fn render(&self, text: &str) -> String {
        let mut html = String::from("<style>");
        if let Some(font) = &self.font {
            html.push_str(&font.font_face());
            html.push(' ');
        }
        html.push_str(&format!(
            ".lisan-output {{ direction: rtl; text-align: right; \
             font-family: {}; font-size: 1.6em; }}",
            self.font_stack()
        ));
        html.push_str("</style>\n<div class=\"lisan-output\" dir=\"rtl\" lang=\"ar\">\n");
        for line in text.lines() {
            html.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
        html.push_str("</div>");
        html
    }

    pub fn render_document(&self, text: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>\n\
             <meta charset=\"utf-8\">\n<title>lisan</title>\n</head>\n\
             <body>\n{}\n</body>\n</html>\n",
            self.render(text)
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn run(args: RenderArgs) -> Result<()> {
    let cfg = Config::load().unwrap_or_default();
    let policy = cfg.fallback(args.fallback);
    let renderer = HtmlRenderer::from_config(&cfg, args.font.as_deref())?;

    let text = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let mut store = DictionaryStore::new(cfg.dictionary_path(args.dict.as_deref()));
    let filter = NumericFilter::new(&cfg.transliteration.numeric_filter_trigger);
    let result = transliterate(&filter.apply(&text), store.get()?, policy);
    let document = renderer.render_document(&result);

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
            fs::write(&path, document).context("Failed to write HTML file")?;
            println!("{}", format!("[OK] Rendered -> {}", path.display()).green());
        }
        None => print!("{}", document),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_lines_rtl() {
        let html = HtmlRenderer::new(None).render("خبر کروا\nما چھے");
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("<p>خبر کروا</p>\n<p>ما چھے</p>"));
        assert!(!html.contains("@font-face"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let html = HtmlRenderer::new(None).render("[<b>] & co");
        assert!(html.contains("<p>[&lt;b&gt;] &amp; co</p>"));
    }

    #[test]
    fn test_embedded_font() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Kanz.ttf");
        fs::write(&path, b"abc").unwrap();

        let font = FontAsset::load(&path, "Kanz").unwrap();
        let html = HtmlRenderer::new(Some(font)).render("عيد");
        assert!(html.contains("src: url(data:font/ttf;base64,YWJj) format('truetype')"));
        assert!(html.contains("font-family: 'Kanz', 'Noto Naskh Arabic'"));
    }

    #[test]
    fn test_font_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            FontAsset::load(dir.path().join("missing.ttf"), "X"),
            Err(RenderError::FontNotFound(_))
        ));

        let path = dir.path().join("font.txt");
        fs::write(&path, b"abc").unwrap();
        assert!(matches!(
            FontAsset::load(&path, "X"),
            Err(RenderError::UnsupportedFont(_))
        ));
    }

    #[test]
    fn test_font_family_with_quote_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Kanz.ttf");
        fs::write(&path, b"abc").unwrap();

        for family in ["Kanz'; } body { color: red", "Ka\"nz", "  "] {
            assert!(matches!(
                FontAsset::load(&path, family),
                Err(RenderError::InvalidFamily(_))
            ));
        }
        assert_eq!(FontAsset::load(&path, " Kanz Marjaan ").unwrap().family, "Kanz Marjaan");
    }

    #[test]
    fn test_document_wrapper() {
        let doc = HtmlRenderer::new(None).render_document("");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"utf-8\">"));
    }
}
