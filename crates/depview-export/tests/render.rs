#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use depview_error::ErrorKind;
use depview_export::{GraphvizRenderer, Renderer, RendererConfig};
use serial_test::serial;
use tempfile::tempdir;

/// Fake layout tool. Arguments arrive as `-T<fmt> <input> -o <output>`.
fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-dot");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake tool");
    let mut perms = fs::metadata(&path).expect("stat fake tool").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake tool");
    path
}

#[test]
#[serial]
fn renders_through_configured_tool() {
    let dir = tempdir().unwrap();
    let tool = fake_tool(dir.path(), r#"echo "$1" > "$4""#);
    let input = dir.path().join("graph.dot");
    fs::write(&input, "digraph solution {\n}\n").unwrap();
    let output = dir.path().join("graph.svg");

    let renderer = GraphvizRenderer::new(RendererConfig {
        tool: Some(tool),
        ..RendererConfig::default()
    })
    .unwrap();
    renderer.render(&input, &output).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap().trim(), "-Tsvg");
}

#[test]
#[serial]
fn non_zero_exit_is_a_render_error() {
    let dir = tempdir().unwrap();
    let tool = fake_tool(dir.path(), "echo 'syntax error in line 1' >&2\nexit 2");
    let input = dir.path().join("graph.dot");
    fs::write(&input, "not dot").unwrap();

    let renderer = GraphvizRenderer::new(RendererConfig {
        tool: Some(tool),
        ..RendererConfig::default()
    })
    .unwrap();
    let err = renderer
        .render(&input, &dir.path().join("graph.png"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RenderFailed);
    assert_eq!(err.operation(), "render::graphviz");
    assert_eq!(err.context_value("stderr"), Some("syntax error in line 1"));
}

#[test]
fn missing_tool_is_reported_before_rendering() {
    let dir = tempdir().unwrap();
    let result = GraphvizRenderer::new(RendererConfig {
        tool: Some(dir.path().join("no-dot-here")),
        ..RendererConfig::default()
    });
    assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::ToolNotFound));
}
