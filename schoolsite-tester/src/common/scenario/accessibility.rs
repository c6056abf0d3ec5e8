use anyhow::Result;
use schoolsite_core::shortcuts::{self, KeyChord, Shortcut};
use schoolsite_core::testing::{ClassSet, MemoryStore};
use schoolsite_core::{
    ACTIVE_MARKER, AccessibilityController, AccessibilityPreference, ClassList,
    DEFAULT_STORAGE_KEY, Mode, applied_modes, apply_mode,
};

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};

pub struct ExclusiveModeScenario;
pub struct PersistenceScenario;
pub struct MalformedPreferenceScenario;
pub struct KeyboardShortcutsScenario;

/// Records that must restore to "no mode".
pub const MALFORMED_RECORDS: [&str; 6] = [
    r#"{"isActive": tru"#,
    r#"{"isActive":true,"mode":"sepia"}"#,
    r#"{"isActive":false,"mode":"grayscale"}"#,
    r#"{"isActive":true,"mode":null}"#,
    "[]",
    "",
];

fn mode_for(iteration: usize) -> Mode {
    Mode::ALL[iteration % Mode::ALL.len()]
}

fn controller(store: &MemoryStore) -> AccessibilityController<MemoryStore> {
    AccessibilityController::new(store.clone(), DEFAULT_STORAGE_KEY)
}

fn exclusive_check(iteration: usize) -> Result<()> {
    let first = mode_for(iteration);
    let second = mode_for(iteration + 1);
    let mut ctrl = controller(&MemoryStore::default());
    let mut root = ClassSet::from_classes(["js"]);

    apply_mode(&mut root, ctrl.set_mode(first).mode);
    apply_mode(&mut root, ctrl.set_mode(second).mode);
    anyhow::ensure!(
        applied_modes(&root) == [second],
        "{first} then {second} left {:?}",
        applied_modes(&root)
    );
    anyhow::ensure!(root.contains(ACTIVE_MARKER), "active marker missing");
    anyhow::ensure!(root.contains("js"), "unrelated root classes must survive");

    apply_mode(&mut root, ctrl.reset().mode);
    anyhow::ensure!(applied_modes(&root).is_empty(), "reset left a mode applied");
    anyhow::ensure!(!root.contains(ACTIVE_MARKER), "reset left the active marker");
    Ok(())
}

fn persistence_check(iteration: usize) -> Result<()> {
    let mode = mode_for(iteration);
    let store = MemoryStore::default();
    controller(&store).set_mode(mode);

    let stored = store
        .get(DEFAULT_STORAGE_KEY)
        .ok_or_else(|| anyhow::anyhow!("set_mode did not persist"))?;
    let record = AccessibilityPreference::from_json(&stored)
        .ok_or_else(|| anyhow::anyhow!("persisted record is not valid JSON: {stored}"))?;
    anyhow::ensure!(
        record.is_active && record.mode.as_deref() == Some(mode.class_name()),
        "unexpected record {stored}"
    );

    let restored = controller(&store).restore();
    anyhow::ensure!(restored.mode == Some(mode), "reload restored {:?}", restored.mode);
    anyhow::ensure!(!restored.panel.is_visible(), "restore must not open the panel");
    Ok(())
}

fn malformed_check(iteration: usize) -> Result<()> {
    let raw = MALFORMED_RECORDS[iteration % MALFORMED_RECORDS.len()];
    let store = MemoryStore::default();
    store.insert(DEFAULT_STORAGE_KEY, raw);
    let restored = controller(&store).restore();
    anyhow::ensure!(
        restored.mode.is_none() && !restored.is_active,
        "record {raw:?} restored {restored:?}"
    );

    store.fail_reads(true);
    let restored = controller(&store).restore();
    anyhow::ensure!(restored.mode.is_none(), "unreadable storage restored a mode");
    Ok(())
}

fn keyboard_check(_iteration: usize) -> Result<()> {
    for shortcut in Shortcut::ALL {
        let chord = KeyChord::alt(shortcut.key());
        anyhow::ensure!(
            shortcuts::resolve(&chord, true) == Some(shortcut),
            "Alt+{} did not resolve",
            shortcut.key()
        );
        anyhow::ensure!(
            shortcuts::resolve(&chord.in_editable(), true).is_none(),
            "Alt+{} fired from a text field",
            shortcut.key()
        );
    }

    let store = MemoryStore::default();
    let mut ctrl = controller(&store);
    let toggled = ctrl.apply_shortcut(Shortcut::TogglePanel);
    anyhow::ensure!(toggled.panel.is_visible(), "Alt+1 should open the panel");
    let contrast = ctrl.apply_shortcut(Shortcut::HighContrast);
    anyhow::ensure!(contrast.mode == Some(Mode::HighContrast), "Alt+2 mode");
    anyhow::ensure!(!contrast.panel.is_visible(), "choosing a mode hides the panel");
    let large = ctrl.apply_shortcut(Shortcut::LargeText);
    anyhow::ensure!(large.mode == Some(Mode::LargeText), "Alt+3 mode");
    let reset = ctrl.apply_shortcut(Shortcut::Reset);
    anyhow::ensure!(reset.mode.is_none() && !reset.is_active, "Alt+0 reset");
    anyhow::ensure!(
        store.get(DEFAULT_STORAGE_KEY).as_deref() == Some(r#"{"isActive":false,"mode":null}"#),
        "reset should persist an inactive record"
    );
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for ExclusiveModeScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        for mode in Mode::ALL {
            ctx.probe.choose_mode(mode).await?;
            let state = ctx.probe.state().await?;
            anyhow::ensure!(
                state.applied_modes() == [mode],
                "after choosing {mode} root has {:?}",
                state.root_classes
            );
            anyhow::ensure!(state.panel_hidden, "panel should close after choosing {mode}");
            if ctx.verbose {
                println!("  ♿ {mode} applied exclusively");
            }
        }
        ctx.probe.click(".accessibility-toggle").await?;
        ctx.probe.click(".accessibility-reset").await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(
            state.applied_modes().is_empty() && !state.root_classes.iter().any(|c| c == ACTIVE_MARKER),
            "reset left {:?}",
            state.root_classes
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserScenario for PersistenceScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        ctx.probe.choose_mode(Mode::LargeText).await?;
        ctx.probe.reload().await?;

        let state = ctx.probe.state().await?;
        anyhow::ensure!(
            state.applied_modes() == [Mode::LargeText],
            "reload restored {:?}",
            state.root_classes
        );
        let pref = state
            .preference()
            .ok_or_else(|| anyhow::anyhow!("no stored record after reload"))?;
        anyhow::ensure!(
            pref.restorable_mode() == Some(Mode::LargeText),
            "stored record {:?}",
            state.stored_preference
        );
        anyhow::ensure!(state.panel_hidden, "panel should stay hidden after reload");
        ctx.probe.clear_stored().await
    }
}

#[async_trait::async_trait]
impl BrowserScenario for MalformedPreferenceScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        for raw in MALFORMED_RECORDS {
            ctx.probe.set_stored(raw).await?;
            ctx.probe.reload().await?;
            let state = ctx.probe.state().await?;
            anyhow::ensure!(
                state.applied_modes().is_empty(),
                "record {raw:?} applied {:?}",
                state.root_classes
            );
        }
        ctx.probe.clear_stored().await
    }
}

#[async_trait::async_trait]
impl BrowserScenario for KeyboardShortcutsScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        ctx.probe.clear_stored().await?;
        ctx.probe.reload().await?;

        ctx.probe.press_alt("2", true).await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(state.applied_modes().is_empty(), "Alt+2 fired inside a text field");

        ctx.probe.press_alt("1", false).await?;
        anyhow::ensure!(!ctx.probe.state().await?.panel_hidden, "Alt+1 should open the panel");
        ctx.probe.press_alt("1", false).await?;
        anyhow::ensure!(ctx.probe.state().await?.panel_hidden, "Alt+1 should close the panel");

        ctx.probe.press_alt("2", false).await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(
            state.applied_modes() == [Mode::HighContrast],
            "Alt+2 applied {:?}",
            state.root_classes
        );
        ctx.probe.press_alt("3", false).await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(state.applied_modes() == [Mode::LargeText], "Alt+3 applied {:?}", state.root_classes);

        ctx.probe.press_alt("0", false).await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(state.applied_modes().is_empty(), "Alt+0 left {:?}", state.root_classes);
        Ok(())
    }
}

impl CombinedScenario for ExclusiveModeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Accessibility Exclusive Mode", exclusive_check))
    }
}

impl CombinedScenario for PersistenceScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Accessibility Persistence", persistence_check))
    }
}

impl CombinedScenario for MalformedPreferenceScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Malformed Preference", malformed_check))
    }
}

impl CombinedScenario for KeyboardShortcutsScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Keyboard Shortcuts", keyboard_check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_malformed_record_is_exercised() {
        for i in 0..MALFORMED_RECORDS.len() {
            malformed_check(i).expect("malformed record ignored");
        }
    }

    #[test]
    fn every_mode_pair_is_exclusive_and_persists() {
        for i in 0..Mode::ALL.len() {
            exclusive_check(i).expect("exclusive");
            persistence_check(i).expect("persistence");
        }
    }

    #[test]
    fn keyboard_check_passes() {
        keyboard_check(0).expect("shortcuts");
    }
}
