#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pomsynth_generator::{Coordinate, Dependency, DependencySet, ProjectIdentity, Scope, pom};

/// 퍼저용 구조적 의존성 입력
#[derive(Arbitrary, Debug)]
struct FuzzDependency {
    group_id: String,
    artifact_id: String,
    version: String,
    test_scope: bool,
}

fuzz_target!(|input: Vec<FuzzDependency>| {
    // 의존성 수 제한 (퍼징 성능)
    let set: DependencySet = input
        .iter()
        .take(100)
        .filter(|d| {
            // XML 1.0에서 허용되지 않는 제어 문자는 제외
            [&d.group_id, &d.artifact_id, &d.version]
                .iter()
                .all(|s| !s.chars().any(|c| c.is_control() || matches!(c, '\u{FFFE}' | '\u{FFFF}')))
        })
        .filter_map(|d| {
            let coordinate = Coordinate::new(
                d.group_id.as_str(),
                d.artifact_id.as_str(),
                d.version.as_str(),
            )
            .ok()?;
            let scope = if d.test_scope { Scope::Test } else { Scope::Compile };
            Some(Dependency::new(coordinate, scope))
        })
        .collect();

    if let Ok(xml) = pom::render(set.iter(), &ProjectIdentity::default()) {
        let doc = roxmltree::Document::parse(&xml).expect("rendered descriptor must be well-formed");
        let count = doc
            .descendants()
            .filter(|n| n.has_tag_name("dependency"))
            .count();
        assert_eq!(count, set.len());
    }
});
