//! Post-processing and minification with lightningcss
//!
//! Both stages parse with error recovery, lower and prefix for the configured
//! browser targets and print with a fresh source map that is chained onto the
//! map of the previous stage.
//!
//! A stage without a previous map starts the chain itself. Its single map
//! source holds the CSS it was given, so the source is named after the input
//! with a `.css` extension (`scss/app.scss` becomes `scss/app.css`) rather
//! than after the stylesheet the CSS was compiled from.

use std::path::Path;
use std::sync::{Arc, RwLock};

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use parcel_sourcemap::SourceMap;

use crate::domain::ports::{CssTransformer, Minifier, ProcessedCss, TransformRequest};
use crate::error::{KabaError, KabaResult};

/// Resolve browserslist queries into lightningcss targets
pub fn browser_targets<S: AsRef<str>>(queries: &[S]) -> KabaResult<Targets> {
    if queries.is_empty() {
        return Ok(Targets::default());
    }
    let browsers = Browsers::from_browserslist(queries.iter().map(|q| q.as_ref()))
        .map_err(|e| KabaError::Targets(e.to_string()))?;
    Ok(Targets {
        browsers,
        ..Targets::default()
    })
}

/// Serialize a map to its JSON form
pub fn map_to_json(map: &mut SourceMap) -> KabaResult<String> {
    map.to_json(None)
        .map_err(|e| KabaError::SourceMap(format!("{e:?}")))
}

/// Vendor prefixing and syntax lowering, pretty printed
#[derive(Debug, Clone, Default)]
pub struct LightningTransformer {
    targets: Targets,
}

impl LightningTransformer {
    pub fn new(targets: Targets) -> Self {
        Self { targets }
    }
}

impl CssTransformer for LightningTransformer {
    fn process(&self, request: TransformRequest<'_>) -> KabaResult<ProcessedCss> {
        let file = request.from.clone();
        run(&self.targets, request, false).map_err(|message| KabaError::PostProcess { file, message })
    }
}

/// Minified printing of already processed CSS
#[derive(Debug, Clone, Default)]
pub struct LightningMinifier {
    targets: Targets,
}

impl LightningMinifier {
    pub fn new(targets: Targets) -> Self {
        Self { targets }
    }
}

impl Minifier for LightningMinifier {
    fn minify(&self, request: TransformRequest<'_>) -> KabaResult<ProcessedCss> {
        let file = request.to.clone();
        run(&self.targets, request, true).map_err(|message| KabaError::Minify { file, message })
    }
}

/// Stage failure message; source map errors are reported like any other
type StageResult<T> = Result<T, String>;

fn run(targets: &Targets, request: TransformRequest<'_>, minify: bool) -> StageResult<ProcessedCss> {
    let filename = map_source_name(&request.from);
    let warnings = Arc::new(RwLock::new(Vec::new()));

    let mut sheet = StyleSheet::parse(
        request.css,
        ParserOptions {
            filename: filename.clone(),
            error_recovery: true,
            warnings: Some(warnings.clone()),
            ..ParserOptions::default()
        },
    )
    .map_err(|e| e.to_string())?;

    sheet
        .minify(MinifyOptions {
            targets: targets.clone(),
            ..MinifyOptions::default()
        })
        .map_err(|e| e.to_string())?;

    let mut map = if request.source_map {
        let source = if request.prev_map.is_some() {
            filename.clone()
        } else {
            map_source_name(&request.from.with_extension("css"))
        };
        let mut map = SourceMap::new("/");
        let index = map.add_source(&source);
        map.set_source_content(index as usize, request.css)
            .map_err(|e| format!("{e:?}"))?;
        Some(map)
    } else {
        None
    };

    let printed = sheet
        .to_css(PrinterOptions {
            minify,
            source_map: map.as_mut(),
            targets: targets.clone(),
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;

    if let (Some(map), Some(mut prev)) = (map.as_mut(), request.prev_map) {
        map.extends(&mut prev).map_err(|e| format!("{e:?}"))?;
    }

    let warnings = warnings
        .read()
        .map(|w| w.iter().map(|e| e.to_string()).collect())
        .unwrap_or_default();

    Ok(ProcessedCss {
        css: printed.code,
        map,
        warnings,
    })
}

/// Map sources use forward slashes
fn map_source_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(css: &str) -> TransformRequest<'_> {
        TransformRequest {
            css,
            from: PathBuf::from("scss/app.scss"),
            to: PathBuf::from("build/css/app.css"),
            prev_map: None,
            source_map: true,
        }
    }

    #[test]
    fn transformer_prefixes_for_old_browsers() {
        let targets = browser_targets(&["safari 10"]).unwrap();
        let out = LightningTransformer::new(targets)
            .process(request(".a {\n  user-select: none;\n}\n"))
            .unwrap();

        assert!(out.css.contains("-webkit-user-select: none"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn transformer_map_names_compiled_css_source() {
        let out = LightningTransformer::default()
            .process(request(".a {\n  color: red;\n}\n"))
            .unwrap();

        let mut map = out.map.unwrap();
        let json: serde_json::Value = serde_json::from_str(&map_to_json(&mut map).unwrap()).unwrap();
        assert_eq!(json["sources"][0], "scss/app.css");
        assert_eq!(json["sources"].as_array().unwrap().len(), 1);
        assert_eq!(json["sourcesContent"][0], ".a {\n  color: red;\n}\n");
    }

    #[test]
    fn recovers_from_invalid_rules() {
        let out = LightningTransformer::default()
            .process(request(".a { color: red; }\n.b { color: ; }\n@@@ {}\n"))
            .unwrap();
        assert!(out.css.contains("color: red"));
    }

    #[test]
    fn minifier_output() {
        let out = LightningMinifier::default()
            .minify(TransformRequest {
                source_map: false,
                ..request(".outer .inner {\n  color: red;\n}\n")
            })
            .unwrap();

        insta::assert_snapshot!(out.css, @".outer .inner{color:red}");
        assert!(out.map.is_none());
    }

    #[test]
    fn minifier_chains_previous_map() {
        let processed = LightningTransformer::default()
            .process(request(".a {\n  color: red;\n}\n\n.b {\n  margin: 0;\n}\n"))
            .unwrap();

        let minified = LightningMinifier::default()
            .minify(TransformRequest {
                css: &processed.css,
                from: PathBuf::from("build/css/app.css"),
                to: PathBuf::from("build/css/app.css"),
                prev_map: processed.map,
                source_map: true,
            })
            .unwrap();

        let mut map = minified.map.unwrap();
        let json = map_to_json(&mut map).unwrap();
        assert!(json.contains("scss/app.css"));
        assert!(!json.contains("scss/app.scss"));
        assert!(json.contains(".b {\\n  margin: 0;"));
    }

    #[test]
    fn invalid_query_is_rejected() {
        let err = browser_targets(&["definitely not a browser"]).unwrap_err();
        assert!(matches!(err, KabaError::Targets(_)));
    }

    #[test]
    fn empty_queries_mean_no_targets() {
        let targets = browser_targets::<&str>(&[]).unwrap();
        assert!(targets.browsers.is_none());
    }
}
