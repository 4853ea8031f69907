//! Source lints for the game modules.
//!
//! 1. Bracket-key text (`[X]`) shown in a `render.rs` must be registered as a
//!    click target via `push_clickable()`. `cl.push(Line::from("[R] ..."))`
//!    renders the hint but leaves it untappable on touch screens.
//! 2. `state.rs`, `logic.rs` and `scene.rs` are the round core: they must not
//!    name DOM or terminal crates, nor call into the widget renderer
//!    (`render.rs`). Drawing goes through `canvas::Surface` only.

use std::fs;
use std::path::Path;

/// Check if a string literal contains a bracket-key pattern like `[I]`, `[S]`, `[1]`.
fn contains_bracket_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return false;
    }
    for i in 0..bytes.len() - 2 {
        if bytes[i] == b'[' && bytes[i + 2] == b']' {
            let ch = bytes[i + 1];
            if ch.is_ascii_alphanumeric() || b"-=!~{}|\\".contains(&ch) {
                return true;
            }
        }
    }
    false
}

/// Scan source for `push(` calls (non-clickable) containing bracket-key patterns.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();

        // Skip comments
        if trimmed.starts_with("//") || trimmed.starts_with("///") {
            continue;
        }

        // Must contain a bracket-key pattern
        if !contains_bracket_key(line) {
            continue;
        }

        // Check: is this inside a non-clickable `push(` call?
        let has_push = line.contains(".push(");
        let has_clickable = line.contains("push_clickable(");

        if has_push && !has_clickable {
            violations.push((line_num_0 + 1, trimmed.to_string()));
        }
    }

    violations
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut all_violations = Vec::new();

    visit_render_files(&games_dir, &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found bracket-key text [X] in non-clickable cl.push() calls.\n\
             These should use push_clickable().\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

/// Paths the round core must not use.
const PLATFORM_CRATES: &[&str] = &["web_sys", "js_sys", "ratzilla", "wasm_bindgen", "render::"];

/// Lines of `source` (outside comments) that name a platform crate or the renderer.
fn find_platform_refs(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| PLATFORM_CRATES.iter().any(|c| line.contains(c)))
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

#[test]
fn round_core_is_platform_free() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut all_violations = Vec::new();
    let mut checked = 0;

    visit_files(&games_dir, &["state.rs", "logic.rs", "scene.rs"], &mut |path, source| {
        checked += 1;
        for (line_num, line) in find_platform_refs(source) {
            all_violations.push((path.display().to_string(), line_num, line));
        }
    });

    assert!(checked >= 3, "expected to find the round core sources");
    if !all_violations.is_empty() {
        let mut msg = String::from("Round core must not depend on DOM/terminal crates or the renderer:\n\n");
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    visit_files(dir, &["render.rs"], &mut |path, source| {
        let display_path = path.display().to_string();
        for (line_num, line) in find_bracket_key_in_push(source) {
            violations.push((display_path.clone(), line_num, line));
        }
    });
}

/// Call `f` with the contents of every file under `dir` named one of `names`.
fn visit_files(dir: &Path, names: &[&str], f: &mut dyn FnMut(&Path, &str)) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_files(&path, names, f);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| names.contains(&n))
            .unwrap_or(false)
        {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            f(&path, &source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [R] Reiniciar"));"#;
        let violations = find_bracket_key_in_push(source);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [S] Empezar"), START_ROUND);"#;
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_plain_text_push() {
        let source = r#"cl.push(Line::from(final_score_text(score)));"#;
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [S] Empezar"));"#;
        let violations = find_bracket_key_in_push(source);
        assert!(violations.is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[I]"));
        assert!(contains_bracket_key("[S]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[0]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[II]"));
        assert!(!contains_bracket_key("abc"));
    }

    #[test]
    fn detects_platform_crates() {
        let source = "use rand::Rng;\nlet w = web_sys::window();\n// js_sys in a comment is fine\nuse super::render::draw;\nuse super::scene;\n";
        let refs = find_platform_refs(source);
        assert_eq!(refs.iter().map(|r| r.0).collect::<Vec<_>>(), vec![2, 4]);
    }
}
