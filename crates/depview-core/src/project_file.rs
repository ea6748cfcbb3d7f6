//! Reading `<ProjectReference>` items out of MSBuild project files.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::path;
use crate::project::ProjectId;
use crate::{Error, Result};

/// One `<ProjectReference>` item.
///
/// Classic project files carry the target's GUID in a `<Project>` child;
/// SDK-style files only have the `Include` path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectReferenceDecl {
    /// `Include` attribute, resolved against the referencing project's directory.
    pub include: Option<PathBuf>,
    pub id: Option<ProjectId>,
    pub name: Option<String>,
}

#[derive(Clone, Copy)]
enum Capture {
    None,
    Id,
    Name,
}

/// Read a project file and return its project references in document order.
pub fn read_project_references(project_path: &Path) -> Result<Vec<ProjectReferenceDecl>> {
    let text = fs::read_to_string(project_path).map_err(|e| {
        Error::from(e)
            .with_operation("project_file::read")
            .with_context("path", project_path.display().to_string())
    })?;
    let dir = project_path.parent().unwrap_or_else(|| Path::new(""));
    parse_project_references(&text, dir).map_err(|e| {
        e.with_context("path", project_path.display().to_string())
    })
}

/// Parse project-file XML. `project_dir` anchors relative `Include` paths.
pub fn parse_project_references(xml: &str, project_dir: &Path) -> Result<Vec<ProjectReferenceDecl>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut refs = Vec::new();
    let mut current: Option<ProjectReferenceDecl> = None;
    let mut capture = Capture::None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::invalid_format(format!("malformed project file: {e}"))
                .with_operation("project_file::parse")
                .with_context("position", reader.buffer_position().to_string())
                .set_source(e)
        })?;

        match event {
            Event::Start(start) => match start.local_name().as_ref() {
                b"ProjectReference" => current = Some(start_reference(&start, project_dir)),
                b"Project" if current.is_some() => capture = Capture::Id,
                b"Name" if current.is_some() => capture = Capture::Name,
                _ => {}
            },
            Event::Empty(start) if start.local_name().as_ref() == b"ProjectReference" => {
                refs.push(start_reference(&start, project_dir));
            }
            Event::Text(text) => {
                let Some(decl) = current.as_mut() else {
                    continue;
                };
                let value = text
                    .unescape()
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default();
                match capture {
                    Capture::Id => decl.id = ProjectId::parse(&value),
                    Capture::Name => decl.name = Some(value),
                    Capture::None => {}
                }
            }
            Event::End(end) => {
                capture = Capture::None;
                if end.local_name().as_ref() == b"ProjectReference" {
                    refs.extend(current.take());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(refs)
}

fn start_reference(start: &BytesStart<'_>, project_dir: &Path) -> ProjectReferenceDecl {
    let include = start
        .try_get_attribute("Include")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
        .filter(|v| !v.trim().is_empty())
        .map(|raw| path::resolve(project_dir, &path::from_manifest(&raw)));

    ProjectReferenceDecl {
        include,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_classic_references_with_guid() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup>
    <ProjectReference Include="..\Core\Core.csproj">
      <Project>{22222222-2222-2222-2222-222222222222}</Project>
      <Name>Core</Name>
    </ProjectReference>
  </ItemGroup>
</Project>"#;
        let refs = parse_project_references(xml, Path::new("/repo/src/App")).unwrap();
        assert_eq!(
            refs,
            vec![ProjectReferenceDecl {
                include: Some(PathBuf::from("/repo/src/Core/Core.csproj")),
                id: ProjectId::parse("22222222-2222-2222-2222-222222222222"),
                name: Some("Core".to_string()),
            }]
        );
    }

    #[test]
    fn reads_sdk_style_references() {
        let xml = r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Serilog" Version="3.0.0" />
    <ProjectReference Include="../Data/Data.csproj" />
  </ItemGroup>
</Project>"#;
        let refs = parse_project_references(xml, Path::new("/repo/Api")).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].include, Some(PathBuf::from("/repo/Data/Data.csproj")));
        assert_eq!(refs[0].id, None);
    }

    #[test]
    fn outer_project_element_is_not_a_reference_guid() {
        let xml = r#"<Project><PropertyGroup><Name>Ignored</Name></PropertyGroup></Project>"#;
        let refs = parse_project_references(xml, Path::new("")).unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse_project_references("<Project><ItemGroup></Project>", Path::new(""))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
