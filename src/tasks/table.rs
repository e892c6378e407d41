use crate::tasks::definition::TaskDefinition;

/// Named tasks, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    entries: Vec<(String, TaskDefinition)>,
}

impl TaskTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task, replacing the definition in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, definition: impl Into<TaskDefinition>) {
        let name = name.into();
        let definition = definition.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = definition,
            None => self.entries.push((name, definition)),
        }
    }

    /// Builder form of [`TaskTable::insert`]
    #[must_use]
    pub fn task(mut self, name: impl Into<String>, definition: impl Into<TaskDefinition>) -> Self {
        self.insert(name, definition);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, D> FromIterator<(K, D)> for TaskTable
where
    K: Into<String>,
    D: Into<TaskDefinition>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut table = TaskTable::new();
        for (name, definition) in iter {
            table.insert(name, definition);
        }
        table
    }
}
