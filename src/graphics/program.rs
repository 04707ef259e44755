/// Preprocessor-style constants handed to the shader compiler, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefineList {
    defines: Vec<(String, String)>,
}

impl DefineList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a define, replacing the value of an existing one with the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        let name = name.into();
        let value = value.to_string();
        match self.defines.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.defines.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.defines
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defines.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.defines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }
}

/// Where a named shader input lives in a compiled program's parameter layout.
///
/// Only meaningful for the program it was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindLocation {
    pub group: u32,
    pub binding: u32,
}

impl BindLocation {
    pub const fn new(group: u32, binding: u32) -> Self {
        Self { group, binding }
    }
}

/// Name based lookup into a compiled program's resource layout.
pub trait ProgramReflection {
    fn resource_binding(&self, name: &str) -> Option<BindLocation>;
}
