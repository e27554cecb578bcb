//! Knowledge about DOM-testing libraries: which modules count as one, how
//! their query accessors are named, and how a call resolves to a query.

pub mod imports;
pub mod query;
pub mod resolver;

/// Module sources recognized as a testing library when nothing else is
/// configured.
pub static DEFAULT_MODULES: &[&str] = &[
    "@testing-library/dom",
    "@testing-library/react",
    "@testing-library/vue",
    "@testing-library/angular",
    "@testing-library/svelte",
    "@testing-library/preact",
    "@marko/testing-library",
];

/// Everything the testing-library rules need to know, in one immutable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestingLibrarySettings {
    /// Import sources that count as a testing library. Compared exactly.
    pub modules: Vec<String>,
    /// Name of the exported `screen` object.
    pub screen: String,
    /// Name of the exported `render` function.
    pub render: String,
    /// Name of the helper waiting for an element to disappear.
    pub wait_for_element_to_be_removed: String,
}

impl Default for TestingLibrarySettings {
    fn default() -> Self {
        Self {
            modules: DEFAULT_MODULES.iter().map(|x| x.to_string()).collect(),
            screen: "screen".to_string(),
            render: "render".to_string(),
            wait_for_element_to_be_removed: "waitForElementToBeRemoved".to_string(),
        }
    }
}

impl TestingLibrarySettings {
    pub fn with_modules(modules: Vec<String>) -> Self {
        Self { modules, ..Default::default() }
    }

    pub fn is_recognized_module(&self, source: &str) -> bool {
        self.modules.iter().any(|module| module == source)
    }
}
