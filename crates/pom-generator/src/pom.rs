//! Maven 프로젝트 descriptor 직렬화
//!
//! 타입이 있는 문서 트리를 quick-xml serde 직렬화기로 변환합니다.
//! 마크업을 문자열로 이어붙이지 않으므로 이스케이프는 직렬화기가 처리합니다.

use serde::Serialize;

use crate::error::GeneratorError;
use crate::types::{Dependency, ProjectIdentity, Scope};

/// POM 4.0.0 기본 네임스페이스
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// XML Schema instance 네임스페이스
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// `xsi:schemaLocation` 값
pub const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

/// POM model 버전
pub const MODEL_VERSION: &str = "4.0.0";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
struct ProjectElement<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:xsi")]
    xmlns_xsi: &'static str,
    #[serde(rename = "@xsi:schemaLocation")]
    schema_location: &'static str,
    #[serde(rename = "modelVersion")]
    model_version: &'static str,
    #[serde(rename = "groupId")]
    group_id: &'a str,
    #[serde(rename = "artifactId")]
    artifact_id: &'a str,
    version: &'a str,
    dependencies: DependenciesElement<'a>,
}

#[derive(Serialize)]
struct DependenciesElement<'a> {
    dependency: Vec<DependencyElement<'a>>,
}

#[derive(Serialize)]
struct DependencyElement<'a> {
    #[serde(rename = "groupId")]
    group_id: &'a str,
    #[serde(rename = "artifactId")]
    artifact_id: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<&'static str>,
}

impl<'a> From<&'a Dependency> for DependencyElement<'a> {
    fn from(dep: &'a Dependency) -> Self {
        Self {
            group_id: dep.coordinate.group_id(),
            artifact_id: dep.coordinate.artifact_id(),
            version: dep.coordinate.version(),
            // compile은 Maven 기본값이므로 생략
            scope: match dep.scope {
                Scope::Test => Some(Scope::Test.as_str()),
                Scope::Compile => None,
            },
        }
    }
}

/// 의존성 목록을 완전한 descriptor 문서로 직렬화합니다.
///
/// 입력 순서가 그대로 `<dependency>` 요소 순서가 됩니다. 중복 제거는
/// 호출자([`DependencySet`](crate::dedup::DependencySet))의 책임입니다.
pub fn render<'a, I>(dependencies: I, identity: &ProjectIdentity) -> Result<String, GeneratorError>
where
    I: IntoIterator<Item = &'a Dependency>,
{
    let project = ProjectElement {
        xmlns: POM_NAMESPACE,
        xmlns_xsi: XSI_NAMESPACE,
        schema_location: SCHEMA_LOCATION,
        model_version: MODEL_VERSION,
        group_id: &identity.group_id,
        artifact_id: &identity.artifact_id,
        version: &identity.version,
        dependencies: DependenciesElement {
            dependency: dependencies.into_iter().map(DependencyElement::from).collect(),
        },
    };

    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some("project"))
        .map_err(|e| GeneratorError::Render(e.to_string()))?;
    serializer.indent(' ', 2);
    project
        .serialize(serializer)
        .map_err(|e| GeneratorError::Render(e.to_string()))?;

    let mut document = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
    document.push_str(XML_DECLARATION);
    document.push('\n');
    document.push_str(&body);
    document.push('\n');
    Ok(document)
}
