use anyhow::Result;

use crate::browser::PageProbe;

pub mod accessibility;
pub mod slider;
pub mod smoke;

pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub probe: PageProbe<'a>,
    pub verbose: bool,
}

/// One pass of a logic check; the argument is the iteration index.
pub type LogicCheck = fn(usize) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: LogicCheck,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, check: LogicCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

pub const SCENARIOS: [(&str, &str); 7] = [
    ("smoke", "Widgets mount with slide 0 active and no accessibility mode"),
    ("slider-cycle", "Next/previous/dots wrap around and keep one active slide"),
    ("slider-single-timer", "Restarting auto-advance never stacks timers"),
    ("accessibility-exclusive", "Choosing a mode replaces any previous mode"),
    ("accessibility-persistence", "The chosen mode survives a reload"),
    ("malformed-preference", "Corrupt or unknown stored records apply nothing"),
    ("keyboard-shortcuts", "Alt+1/2/3/0 drive the panel, except from text fields"),
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "slider-cycle" => Some(Box::new(slider::SliderCycleScenario)),
        "slider-single-timer" => Some(Box::new(slider::SingleTimerScenario)),
        "accessibility-exclusive" => Some(Box::new(accessibility::ExclusiveModeScenario)),
        "accessibility-persistence" => Some(Box::new(accessibility::PersistenceScenario)),
        "malformed-preference" => Some(Box::new(accessibility::MalformedPreferenceScenario)),
        "keyboard-shortcuts" => Some(Box::new(accessibility::KeyboardShortcutsScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.to_vec()
}
