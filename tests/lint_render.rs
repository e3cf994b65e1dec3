//! Source lint over each game under `src/games/<game>/`.
//!
//! Three rules keep what the player sees in step with what the game does:
//!
//! 1. A `[X]` key hint in `render.rs` must not sit on a plain `push(` line;
//!    hint lines go through `push_clickable()` so phones can tap them.
//! 2. Every literal `[X]` hint in `render.rs` names a key that `mod.rs`
//!    handles as `InputEvent::Key('x')`.
//! 3. Every action ID declared in `actions.rs` is registered somewhere in
//!    `render.rs`, so no action is unreachable by tap.

use std::fs;
use std::path::{Path, PathBuf};

/// Keys of every `[X]` hint on `line` (alphanumeric X only), lowercased.
/// Indexing such as `chunks[0]` is not a hint.
fn hint_keys(line: &str) -> Vec<char> {
    let chars: Vec<char> = line.chars().collect();
    (0..chars.len().saturating_sub(2))
        .filter(|&i| chars[i] == '[' && chars[i + 2] == ']' && chars[i + 1].is_ascii_alphanumeric())
        .filter(|&i| i == 0 || !(chars[i - 1].is_alphanumeric() || matches!(chars[i - 1], '_' | ')' | ']')))
        .map(|i| chars[i + 1].to_ascii_lowercase())
        .collect()
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Rule 1: `(line number, line)` of plain pushes carrying a hint.
fn unclickable_hints(render_src: &str) -> Vec<(usize, String)> {
    render_src
        .lines()
        .enumerate()
        .filter(|(_, line)| !is_comment(line))
        .filter(|(_, line)| line.contains(".push(") && !line.contains("push_clickable("))
        .filter(|(_, line)| !hint_keys(line).is_empty())
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

/// Rule 2: hint keys drawn in `render_src` that `mod_src` never matches.
fn unhandled_hint_keys(render_src: &str, mod_src: &str) -> Vec<char> {
    let mut missing: Vec<char> = render_src
        .lines()
        .filter(|line| !is_comment(line))
        .flat_map(hint_keys)
        .filter(|key| !mod_src.contains(&format!("Key('{}')", key)))
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

/// Names of the `pub const` items in an `actions.rs`.
fn action_names(actions_src: &str) -> Vec<String> {
    actions_src
        .lines()
        .filter_map(|line| line.trim().strip_prefix("pub const "))
        .filter_map(|rest| rest.split(':').next())
        .map(|name| name.trim().to_string())
        .collect()
}

/// Rule 3: declared actions that `render_src` never mentions.
fn undrawn_actions(actions_src: &str, render_src: &str) -> Vec<String> {
    let code: String = render_src
        .lines()
        .filter(|line| !is_comment(line))
        .collect::<Vec<_>>()
        .join("\n");
    action_names(actions_src)
        .into_iter()
        .filter(|name| !code.contains(name.as_str()))
        .collect()
}

fn game_dirs() -> Vec<PathBuf> {
    let games = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let Ok(entries) = fs::read_dir(&games) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.join("render.rs").is_file())
        .collect();
    dirs.sort();
    dirs
}

fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).unwrap_or_default()
}

#[test]
fn games_are_found() {
    let names: Vec<String> = game_dirs()
        .iter()
        .filter_map(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert!(names.contains(&"energy".to_string()), "{:?}", names);
    assert!(names.contains(&"shadows".to_string()), "{:?}", names);
}

#[test]
fn render_hints_are_tappable_handled_and_complete() {
    let mut problems = Vec::new();
    for dir in game_dirs() {
        let game = dir.display().to_string();
        let render_src = read(&dir, "render.rs");
        let mod_src = read(&dir, "mod.rs");
        let actions_src = read(&dir, "actions.rs");

        for (line_num, line) in unclickable_hints(&render_src) {
            problems.push(format!("{}/render.rs:{}: hint on a plain push: {}", game, line_num, line));
        }
        for key in unhandled_hint_keys(&render_src, &mod_src) {
            problems.push(format!("{}: hint [{}] drawn but Key('{}') is not handled", game, key, key));
        }
        for name in undrawn_actions(&actions_src, &render_src) {
            problems.push(format!("{}: action {} is never registered in render.rs", game, name));
        }
    }
    assert!(problems.is_empty(), "render lint failed:\n  {}", problems.join("\n  "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_key_detection() {
        assert_eq!(hint_keys(r#"Span::styled(" [C] ", style)"#), vec!['c']);
        assert_eq!(hint_keys("[R] リセット [1]"), vec!['r', '1']);
        assert!(hint_keys("[Esc] メニュー").is_empty());
        assert!(hint_keys("[] [-]").is_empty());
        assert!(hint_keys("format!(\" [{}] \", key)").is_empty());
        assert!(hint_keys("render_header(state, f, chunks[0]);").is_empty());
        assert!(hint_keys("(h_chunks[0], Some(h_chunks[1]))").is_empty());
    }

    #[test]
    fn plain_push_with_hint_flagged() {
        let src = r#"cl.push(Line::from(" [R] 新しい盤面"));"#;
        assert_eq!(unclickable_hints(src).len(), 1);
    }

    #[test]
    fn clickable_push_and_comments_allowed() {
        let src = r#"
            cl.push_clickable(Line::from(" [R] 新しい盤面"), RESET);
            // cl.push(Line::from(" [C] 発電"));
            cl.push(Line::from(" hjkl 移動  Space 掘る"));
        "#;
        assert!(unclickable_hints(src).is_empty());
    }

    #[test]
    fn hint_without_key_handler_reported() {
        let render = r#"Span::styled(" [R] ", key_style),
            Span::styled(" [F] ", key_style),"#;
        let handler = "InputEvent::Key('r') | InputEvent::Click(RESET) => self.reset(),";
        assert_eq!(unhandled_hint_keys(render, handler), vec!['f']);
    }

    #[test]
    fn action_constants_must_be_drawn() {
        let actions = "pub const RESET: u16 = 1;\npub const MODE_FLAG: u16 = 3;\n";
        assert_eq!(action_names(actions), vec!["RESET", "MODE_FLAG"]);

        let render = "cl.push_clickable(reset, RESET);\n// MODE_FLAG tab comes later\n";
        assert_eq!(undrawn_actions(actions, render), vec!["MODE_FLAG".to_string()]);
    }
}
