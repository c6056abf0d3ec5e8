use anyhow::Result;
use schoolsite_core::testing::MemoryStore;
use schoolsite_core::{AccessibilityController, SliderController, WidgetConfig};

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};

pub struct SmokeScenario;

fn smoke_check(_iteration: usize) -> Result<()> {
    let config = WidgetConfig::load_from_static();
    config.validate()?;

    let slider: SliderController<()> = SliderController::new(3, config.slider.interval_ms);
    anyhow::ensure!(
        slider.active_index() == Some(0),
        "slider should start on slide 0, got {:?}",
        slider.active_index()
    );

    let mut accessibility =
        AccessibilityController::new(MemoryStore::default(), &config.accessibility.storage_key);
    let restored = accessibility.restore();
    anyhow::ensure!(
        restored.mode.is_none() && !restored.is_active,
        "fresh visitor should have no mode, got {restored:?}"
    );
    anyhow::ensure!(!restored.panel.is_visible(), "panel should start hidden");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        ctx.probe.clear_stored().await?;
        ctx.probe.reload().await?;

        let state = ctx.probe.state().await?;
        if ctx.verbose {
            println!("  📊 Page state: {state:?}");
        }

        anyhow::ensure!(
            state.active_slides == [0],
            "exactly slide 0 should be active, got {:?}",
            state.active_slides
        );
        anyhow::ensure!(
            state.active_dots == [0],
            "exactly dot 0 should be active, got {:?}",
            state.active_dots
        );
        anyhow::ensure!(state.panel_hidden, "accessibility panel should start hidden");
        anyhow::ensure!(
            state.applied_modes().is_empty(),
            "no accessibility mode expected, root has {:?}",
            state.root_classes
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke Test", smoke_check))
    }
}
