//! Strict-typing list reconciliation and mypy.ini rendering.
//!
//! The pipeline is a linear transform: read the declaration list, classify
//! entries into component and core modules, validate them against the ignore
//! table and the filesystem, then render the merged INI document. Every
//! detected problem lands in the shared context's error sink; nothing is
//! raised across this module's boundary except unreadable input files.

use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::Context;
use crate::fsx::{module_rel_path, Filesystem};
use crate::models::Issue;
use crate::settings::{
    CACHE_KEY, COMPONENTS_NAMESPACE, GENERAL_SETTINGS, HEADER, IGNORED_MODULES, PLUGIN,
    STRICT_SETTINGS, STRICT_SETTINGS_CORE,
};

/// Dotted path of identifiers, optionally ending in a `.*` wildcard.
const MODULE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*(\.\*)?$";

/// Filter empty and commented lines out of the declaration text.
pub fn parse_strict_typing(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Partition declared modules into component and core lists, preserving
/// declaration order within each.
pub fn classify(modules: &[String]) -> (Vec<String>, Vec<String>) {
    let mut strict_modules = Vec::new();
    let mut strict_core_modules = Vec::new();
    for module in modules {
        if module.starts_with(COMPONENTS_NAMESPACE) {
            strict_modules.push(module.clone());
        } else {
            strict_core_modules.push(module.clone());
        }
    }
    (strict_modules, strict_core_modules)
}

/// True when `module` is covered by the ignore table, either exactly or by
/// one of its `.*` package entries.
fn overlaps_ignored(module: &str) -> bool {
    let bare = module.strip_suffix(".*").unwrap_or(module);
    IGNORED_MODULES.iter().any(|entry| {
        if *entry == module {
            return true;
        }
        match entry.strip_suffix(".*") {
            Some(prefix) => bare == prefix || bare.starts_with(&format!("{prefix}.")),
            None => false,
        }
    })
}

/// Strict component entries must live under the components namespace and must
/// not contradict the ignore table.
fn validate_strict_list(strict_modules: &[String], ctx: &mut Context) {
    let prefix = format!("{COMPONENTS_NAMESPACE}.");
    for module in strict_modules {
        if !module.starts_with(&prefix) && module != COMPONENTS_NAMESPACE {
            ctx.add_error(
                "component-namespace",
                format!("Only components should be added: {module}"),
            );
        }
        if overlaps_ignored(module) {
            ctx.add_error(
                "ignored-overlap",
                format!("Module '{module}' is in ignored list"),
            );
        }
    }
}

fn validate_module_names(modules: &[String], ctx: &mut Context) {
    let name_re = Regex::new(MODULE_NAME_PATTERN).expect("module name pattern");
    for module in modules {
        if !name_re.is_match(module) {
            ctx.add_error(
                "module-name",
                format!("Module '{module}' is not a valid dotted module name"),
            );
        }
    }
}

fn missing_module_issue<F: Filesystem>(module: &str, root: &Path, lookup: &F) -> Option<Issue> {
    let issue = |message: String| Issue {
        plugin: PLUGIN.to_string(),
        rule: "module-missing".to_string(),
        message,
        fixable: false,
    };
    if let Some(prefix) = module.strip_suffix(".*") {
        let dir = root.join(module_rel_path(prefix));
        if !lookup.is_dir(&dir) {
            return Some(issue(format!("Module '{module}' is not a folder")));
        }
        return None;
    }
    let base = root.join(module_rel_path(module));
    if lookup.is_file(&base.with_extension("py")) || lookup.is_file(&base.join("__init__.py")) {
        return None;
    }
    Some(issue(format!("Module '{module}' doesn't exist")))
}

/// Check every referenced module against the filesystem snapshot. Duplicates
/// are checked independently; issue order follows iteration order.
fn validate_existence<F: Filesystem>(modules: &[&str], root: &Path, lookup: &F, ctx: &mut Context) {
    let found: Vec<Option<Issue>> = modules
        .par_iter()
        .map(|module| missing_module_issue(module, root, lookup))
        .collect();
    ctx.errors.extend(found.into_iter().flatten());
}

fn section_all(options: &[&str], value: &str) -> Vec<(String, String)> {
    options
        .iter()
        .map(|key| (key.to_string(), value.to_string()))
        .collect()
}

/// Render the full document for the given partitions. Section order is fixed
/// regardless of input ordering; within a partition the declaration order is
/// preserved, and the ignore table is iterated in its literal order.
fn render(
    strict_modules: &[String],
    strict_core_modules: &[String],
    python_version: &str,
) -> String {
    let mut sections: Vec<(String, Vec<(String, String)>)> = Vec::new();

    let major_minor: Vec<&str> = python_version.split('.').take(2).collect();
    let mut general = vec![("python_version".to_string(), major_minor.join("."))];
    for (key, value) in GENERAL_SETTINGS {
        general.push((key.to_string(), value.to_string()));
    }
    for key in STRICT_SETTINGS {
        general.push((key.to_string(), "true".to_string()));
    }
    sections.push(("mypy".to_string(), general));

    // Core modules inherit the general strict settings; the core set layers
    // additional checks on top.
    for module in strict_core_modules {
        sections.push((format!("mypy-{module}"), section_all(STRICT_SETTINGS_CORE, "true")));
    }

    // Default-off gate for all components; per-component sections below flip
    // the same keys back on.
    sections.push((
        format!("mypy-{COMPONENTS_NAMESPACE}.*"),
        section_all(STRICT_SETTINGS, "false"),
    ));
    for module in strict_modules {
        sections.push((format!("mypy-{module}"), section_all(STRICT_SETTINGS, "true")));
    }

    sections.push(("mypy-tests.*".to_string(), section_all(STRICT_SETTINGS, "false")));

    for module in IGNORED_MODULES {
        sections.push((
            format!("mypy-{module}"),
            vec![("ignore_errors".to_string(), "true".to_string())],
        ));
    }

    let mut out = String::from(HEADER);
    for (name, options) in &sections {
        out.push_str(&format!("[{name}]\n"));
        for (key, value) in options {
            out.push_str(&format!("{key} = {value}\n"));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Validate an already-parsed declaration list and render the document.
///
/// Returns an empty string when any error tagged for this plugin has been
/// collected; emitting a config derived from contradictory or missing data
/// is skipped rather than attempted.
pub fn generate_from_list<F: Filesystem>(
    parsed_modules: &[String],
    ctx: &mut Context,
    lookup: &F,
) -> String {
    let (strict_modules, strict_core_modules) = classify(parsed_modules);

    validate_strict_list(&strict_modules, ctx);
    validate_module_names(parsed_modules, ctx);

    let all_modules: Vec<&str> = strict_modules
        .iter()
        .map(String::as_str)
        .chain(strict_core_modules.iter().map(String::as_str))
        .chain(IGNORED_MODULES.iter().copied())
        .collect();
    let root = ctx.root.clone();
    validate_existence(&all_modules, &root, lookup, ctx);

    if ctx.has_errors() {
        return String::new();
    }
    render(&strict_modules, &strict_core_modules, &ctx.python_version)
}

/// Read the declaration list from disk, validate it, and render the document.
/// An unreadable declaration file propagates as an I/O error; everything else
/// accumulates in the context.
pub fn generate_and_validate<F: Filesystem>(ctx: &mut Context, lookup: &F) -> io::Result<String> {
    let path = ctx.root.join(&ctx.strict_typing_file);
    let text = fs::read_to_string(path)?;
    let parsed = parse_strict_typing(&text);
    Ok(generate_from_list(&parsed, ctx, lookup))
}

/// Compute the document, cache it on the context, and compare against the
/// on-disk target. Drift is reported as a fixable error; a missing target
/// counts as drift. Comparison is skipped when generation itself failed.
pub fn validate<F: Filesystem>(ctx: &mut Context, lookup: &F) -> io::Result<()> {
    let content = generate_and_validate(ctx, lookup)?;
    ctx.cache.insert(CACHE_KEY.to_string(), content.clone());

    if ctx.has_errors() {
        return Ok(());
    }

    let target = ctx.root.join(&ctx.mypy_ini);
    let on_disk = if lookup.is_file(&target) {
        fs::read_to_string(&target)?
    } else {
        String::new()
    };
    if on_disk.trim() != content {
        let message = format!(
            "File {} is not up to date. Run mypy-config generate",
            ctx.mypy_ini
        );
        ctx.add_fixable_error("stale", message);
    }
    Ok(())
}

/// Write the cached document (plus a trailing newline) to the target path,
/// overwriting any existing content.
pub fn generate(ctx: &Context) -> io::Result<()> {
    let content = ctx.cache.get(CACHE_KEY).map(String::as_str).unwrap_or_default();
    fs::write(ctx.root.join(&ctx.mypy_ini), format!("{content}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsx::{FakeFs, OsFs};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_ctx(root: &Path) -> Context {
        Context {
            root: root.to_path_buf(),
            strict_typing_file: ".strict-typing".to_string(),
            mypy_ini: "mypy.ini".to_string(),
            python_version: "3.9".to_string(),
            errors: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// A fake tree where every ignore-table package exists as a directory.
    fn fake_tree(root: &Path) -> FakeFs {
        let mut fs = FakeFs::default();
        for module in IGNORED_MODULES {
            let prefix = module.strip_suffix(".*").unwrap();
            fs = fs.dir(root.join(module_rel_path(prefix)));
        }
        fs
    }

    fn rule_count(ctx: &Context, rule: &str) -> usize {
        ctx.errors.iter().filter(|e| e.rule == rule).count()
    }

    #[test]
    fn test_parse_strict_typing_filters_comments_and_blanks() {
        let text = "# strict modules\n\nhomeassistant.core\n  homeassistant.components.frontend  \n#homeassistant.components.off\n";
        assert_eq!(
            parse_strict_typing(text),
            vec!["homeassistant.core", "homeassistant.components.frontend"]
        );
    }

    #[test]
    fn test_classify_partitions_on_namespace_prefix() {
        let modules = vec![
            "homeassistant.components.frontend".to_string(),
            "homeassistant.core".to_string(),
            "homeassistant.components".to_string(),
        ];
        let (components, core) = classify(&modules);
        assert_eq!(components, vec!["homeassistant.components.frontend", "homeassistant.components"]);
        assert_eq!(core, vec!["homeassistant.core"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root)
            .file(root.join("homeassistant/components/frontend.py"))
            .file(root.join("homeassistant/core.py"));
        let parsed = vec![
            "homeassistant.components.frontend".to_string(),
            "homeassistant.core".to_string(),
        ];

        let mut ctx1 = test_ctx(&root);
        let out1 = generate_from_list(&parsed, &mut ctx1, &fs);
        let mut ctx2 = test_ctx(&root);
        let out2 = generate_from_list(&parsed, &mut ctx2, &fs);

        assert!(ctx1.errors.is_empty());
        assert!(!out1.is_empty());
        assert_eq!(out1, out2);
        assert!(out1.starts_with("# Automatically generated by mypy-config."));
    }

    #[test]
    fn test_core_module_gets_core_strict_section() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root).file(root.join("homeassistant/core.py"));
        let parsed = vec!["homeassistant.core".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert!(ctx.errors.is_empty());
        assert!(out.contains("[mypy-homeassistant.core]\ndisallow_any_generics = true"));
    }

    #[test]
    fn test_python_version_truncated_to_major_minor() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root);
        let mut ctx = test_ctx(&root);
        ctx.python_version = "3.11.2".to_string();
        let out = generate_from_list(&[], &mut ctx, &fs);
        assert!(out.contains("python_version = 3.11\n"));
    }

    #[test]
    fn test_misplaced_component_entry() {
        let root = PathBuf::from("/repo");
        // Partition is prefix-based, so this lands in the component list and
        // then fails the namespace rule.
        let fs = fake_tree(&root).file(root.join("homeassistant/componentsextra.py"));
        let parsed = vec!["homeassistant.componentsextra".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert_eq!(rule_count(&ctx, "component-namespace"), 1);
        assert_eq!(ctx.errors.len(), 1);
        assert_eq!(out, "");
    }

    #[test]
    fn test_bare_namespace_root_is_allowed() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root).file(root.join("homeassistant/components/__init__.py"));
        let parsed = vec!["homeassistant.components".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert!(ctx.errors.is_empty());
        assert!(out.contains("[mypy-homeassistant.components]\n"));
    }

    #[test]
    fn test_strict_and_ignored_contradiction() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root);
        // demo.* is in the ignore table and its folder exists in the tree.
        let parsed = vec!["homeassistant.components.demo.*".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert_eq!(rule_count(&ctx, "ignored-overlap"), 1);
        assert_eq!(ctx.errors.len(), 1);
        assert_eq!(out, "");
    }

    #[test]
    fn test_ignored_wildcard_covers_plain_entry() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root).file(root.join("homeassistant/components/demo/__init__.py"));
        let parsed = vec!["homeassistant.components.demo".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert_eq!(rule_count(&ctx, "ignored-overlap"), 1);
        assert_eq!(ctx.errors.len(), 1);
        assert_eq!(out, "");
    }

    #[test]
    fn test_missing_module_and_missing_folder() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root);
        let parsed = vec![
            "homeassistant.components.nosuch".to_string(),
            "homeassistant.components.nodir.*".to_string(),
        ];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert_eq!(rule_count(&ctx, "module-missing"), 2);
        assert!(ctx.errors[0].message.contains("doesn't exist"));
        assert!(ctx.errors[1].message.contains("is not a folder"));
        assert_eq!(out, "");
    }

    #[test]
    fn test_malformed_module_name() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root);
        let parsed = vec!["homeassistant..core".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert_eq!(rule_count(&ctx, "module-name"), 1);
        assert_eq!(out, "");
    }

    #[test]
    fn test_component_sections_and_wildcard_gate() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root).file(root.join("homeassistant/components/frontend.py"));
        let parsed = vec!["homeassistant.components.frontend".to_string()];

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&parsed, &mut ctx, &fs);
        assert!(ctx.errors.is_empty());

        let gate = out
            .find("[mypy-homeassistant.components.*]\ncheck_untyped_defs = false")
            .unwrap();
        let section = out
            .find("[mypy-homeassistant.components.frontend]\ncheck_untyped_defs = true")
            .unwrap();
        assert!(gate < section);
        // Every strict key appears forced on in the component section.
        let body = &out[section..];
        for key in STRICT_SETTINGS {
            assert!(body.contains(&format!("{key} = true")));
        }
    }

    #[test]
    fn test_empty_declaration_list_layout() {
        let root = PathBuf::from("/repo");
        let fs = fake_tree(&root);

        let mut ctx = test_ctx(&root);
        let out = generate_from_list(&[], &mut ctx, &fs);
        assert!(ctx.errors.is_empty());

        let general = out.find("[mypy]\n").unwrap();
        let gate = out.find("[mypy-homeassistant.components.*]\n").unwrap();
        let tests_section = out.find("[mypy-tests.*]\n").unwrap();
        let first_ignored = out
            .find("[mypy-homeassistant.components.blueprint.*]\nignore_errors = true")
            .unwrap();
        assert!(general < gate);
        assert!(gate < tests_section);
        assert!(tests_section < first_ignored);
        assert!(out.contains("[mypy-homeassistant.components.zwave.*]\nignore_errors = true"));
    }

    #[test]
    fn test_generate_then_validate_round_trip() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for module in IGNORED_MODULES {
            let prefix = module.strip_suffix(".*").unwrap();
            std::fs::create_dir_all(root.join(module_rel_path(prefix))).unwrap();
        }
        std::fs::write(root.join("homeassistant/components/frontend.py"), "").unwrap();
        std::fs::write(root.join("homeassistant/core.py"), "").unwrap();
        std::fs::write(
            root.join(".strict-typing"),
            "# strict modules\nhomeassistant.core\n\nhomeassistant.components.frontend\n",
        )
        .unwrap();

        // First pass: no mypy.ini on disk yet, so the only finding is drift.
        let mut ctx = test_ctx(root);
        validate(&mut ctx, &OsFs).unwrap();
        assert_eq!(ctx.errors.len(), 1);
        assert_eq!(ctx.errors[0].rule, "stale");
        assert!(ctx.errors[0].fixable);

        generate(&ctx).unwrap();
        let written = std::fs::read_to_string(root.join("mypy.ini")).unwrap();
        assert!(written.ends_with('\n'));
        assert_eq!(written.trim(), ctx.cache[CACHE_KEY]);

        // Second pass: freshly generated file matches the computed document.
        let mut ctx2 = test_ctx(root);
        validate(&mut ctx2, &OsFs).unwrap();
        assert!(ctx2.errors.is_empty());
    }

    #[test]
    fn test_validate_skips_comparison_on_generation_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join(".strict-typing"), "homeassistant.helpers\n").unwrap();
        // helpers module does not exist on disk, so generation fails and the
        // stale comparison never runs even though mypy.ini is absent.
        let mut ctx = test_ctx(root);
        validate(&mut ctx, &OsFs).unwrap();
        assert!(ctx.errors.iter().all(|e| e.rule != "stale"));
        assert_eq!(ctx.cache[CACHE_KEY], "");
    }
}
