use anyhow::{Context, Result};
use schoolsite_core::testing::{FakeTimer, FakeTimers};
use schoolsite_core::{SliderController, WidgetConfig};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};

pub struct SliderCycleScenario;
pub struct SingleTimerScenario;

fn slide_count(iteration: usize) -> usize {
    iteration % 6 + 1
}

fn cycle_check(iteration: usize) -> Result<()> {
    let len = slide_count(iteration);
    let mut slider: SliderController<()> = SliderController::new(len, 5000);

    for step in 1..=len {
        slider.next();
        let expected = step % len;
        anyhow::ensure!(
            slider.active_index() == Some(expected),
            "{len} slides: after {step} next() expected {expected}, got {:?}",
            slider.active_index()
        );
    }

    slider.previous();
    anyhow::ensure!(
        slider.active_index() == Some(len - 1),
        "previous() from 0 should wrap to {}, got {:?}",
        len - 1,
        slider.active_index()
    );

    for index in 0..len {
        slider.go_to(index);
        anyhow::ensure!(slider.active_index() == Some(index), "go_to({index}) ignored");
    }
    slider.go_to(len);
    anyhow::ensure!(
        slider.active_index() == Some(len - 1),
        "out-of-range go_to({len}) must not move the slider"
    );
    Ok(())
}

fn advance_one_period(slider: &mut SliderController<FakeTimer>, timers: &FakeTimers) {
    for _ in 0..timers.live() {
        slider.next();
    }
}

fn single_timer_check(iteration: usize) -> Result<()> {
    let len = slide_count(iteration) + 1;
    let timers = FakeTimers::default();
    let mut slider = SliderController::new(len, 5000);

    for _ in 0..=iteration % 3 {
        slider.start_auto_advance(timers.spawner());
    }
    slider.pointer_left(timers.spawner());
    anyhow::ensure!(timers.live() == 1, "{} timers live after restarts", timers.live());

    advance_one_period(&mut slider, &timers);
    anyhow::ensure!(
        slider.active_index() == Some(1),
        "one period should advance one slide, got {:?}",
        slider.active_index()
    );

    slider.pointer_entered();
    anyhow::ensure!(timers.live() == 0, "hover should cancel the timer");
    advance_one_period(&mut slider, &timers);
    anyhow::ensure!(slider.active_index() == Some(1), "paused slider advanced");

    let mut empty: SliderController<FakeTimer> = SliderController::new(0, 5000);
    empty.start_auto_advance(timers.spawner());
    anyhow::ensure!(!empty.is_running(), "an empty slider must never schedule");
    Ok(())
}

async fn active_slide(ctx: &ScenarioCtx<'_>) -> Result<usize> {
    let state = ctx.probe.state().await?;
    match state.active_slides.as_slice() {
        [index] => Ok(*index),
        other => anyhow::bail!("expected one active slide, got {other:?}"),
    }
}

#[async_trait::async_trait]
impl BrowserScenario for SliderCycleScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        ctx.probe.open(&ctx.base_url).await?;
        ctx.probe.hover_hero(true).await?;

        let slides = ctx.probe.driver().find_all(By::Css(".slide")).await?.len();
        anyhow::ensure!(slides > 0, "page has no slides");
        let start = active_slide(ctx).await?;

        for step in 1..=slides {
            ctx.probe.click(".slider-next").await?;
            let expected = (start + step) % slides;
            let actual = active_slide(ctx)
                .await
                .with_context(|| format!("after {step} clicks on next"))?;
            anyhow::ensure!(actual == expected, "next #{step}: expected {expected}, got {actual}");
        }

        ctx.probe.click(".slider-prev").await?;
        let expected = (start + slides - 1) % slides;
        anyhow::ensure!(active_slide(ctx).await? == expected, "previous did not wrap");

        let target = slides - 1;
        ctx.probe.click_nth(".slider-dots .dot", target).await?;
        let state = ctx.probe.state().await?;
        anyhow::ensure!(
            state.active_slides == [target] && state.active_dots == [target],
            "dot {target} should activate slide and dot, got {state:?}"
        );
        if ctx.verbose {
            println!("  🎞️  Cycled {slides} slides in both directions");
        }
        ctx.probe.hover_hero(false).await
    }
}

#[async_trait::async_trait]
impl BrowserScenario for SingleTimerScenario {
    async fn run_browser(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let interval = u64::from(WidgetConfig::load_from_static().slider.interval_ms);
        ctx.probe.open(&ctx.base_url).await?;

        // Pause, then resume twice: a stacked timer would advance twice per period.
        ctx.probe.hover_hero(true).await?;
        ctx.probe.hover_hero(false).await?;
        ctx.probe.hover_hero(false).await?;
        let slides = ctx.probe.driver().find_all(By::Css(".slide")).await?.len();
        anyhow::ensure!(slides > 2, "need at least three slides, page has {slides}");
        let start = active_slide(ctx).await?;

        ctx.probe.settle(interval + interval / 4).await;
        let after = active_slide(ctx).await?;
        anyhow::ensure!(
            after == (start + 1) % slides,
            "one period should advance exactly one slide: {start} -> {after}"
        );
        Ok(())
    }
}

impl CombinedScenario for SliderCycleScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Slider Cycle", cycle_check))
    }
}

impl CombinedScenario for SingleTimerScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Slider Single Timer", single_timer_check))
    }
}
