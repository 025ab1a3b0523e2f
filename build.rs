use lightningcss::{
    bundler::{Bundler, FileProvider},
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions},
};
use std::fs;
use std::path::Path;

const CSS_ENTRY: &str = "assets/css/main.css";
const CSS_OUT_DIR: &str = "assets/dist";
const CSS_OUT: &str = "assets/dist/bundle.css";

fn main() {
    println!("cargo:rerun-if-changed=assets/css/");

    if let Err(e) = bundle_css(Path::new(CSS_ENTRY), Path::new(CSS_OUT)) {
        panic!("CSS bundling failed: {e}");
    }
}

/// Resolve `@import`s from the entry stylesheet, minify, and write one bundle.
fn bundle_css(entry: &Path, out: &Path) -> Result<(), String> {
    fs::create_dir_all(CSS_OUT_DIR).map_err(|e| format!("create {CSS_OUT_DIR}: {e}"))?;

    let fs_provider = FileProvider::new();
    let mut bundler = Bundler::new(&fs_provider, None, ParserOptions::default());

    let mut stylesheet = bundler
        .bundle(entry)
        .map_err(|e| format!("bundle {}: {e}", entry.display()))?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| format!("minify: {e}"))?;

    let css = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| format!("print: {e}"))?;

    fs::write(out, css.code).map_err(|e| format!("write {}: {e}", out.display()))?;
    Ok(())
}
