//! 의존성 중복 제거 누산기
//!
//! `groupId:artifactId` 키로 순서를 유지하며 첫 번째로 본 항목을 보존합니다.
//! 한 실행이 소유하며 공유되지 않습니다.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::types::Dependency;

/// 삽입 순서를 유지하는 고유 의존성 집합
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    entries: IndexMap<String, Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 의존성을 추가합니다.
    ///
    /// 같은 키가 이미 있으면 아무것도 바꾸지 않고 `false`를 반환합니다.
    /// 처음 본 항목의 version과 scope가 유지됩니다.
    pub fn insert(&mut self, dependency: Dependency) -> bool {
        match self.entries.entry(dependency.dedup_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(dependency);
                true
            }
        }
    }

    /// 키로 보존된 항목을 조회합니다.
    pub fn get(&self, key: &str) -> Option<&Dependency> {
        self.entries.get(key)
    }

    /// 최초 발견 순서의 반복자
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 최초 발견 순서의 벡터로 변환합니다.
    pub fn into_vec(self) -> Vec<Dependency> {
        self.entries.into_values().collect()
    }
}

impl Extend<Dependency> for DependencySet {
    fn extend<T: IntoIterator<Item = Dependency>>(&mut self, iter: T) {
        for dep in iter {
            self.insert(dep);
        }
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<T: IntoIterator<Item = Dependency>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
