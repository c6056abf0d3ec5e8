use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

impl ScenarioResult {
    /// A single browser run, recorded alongside the logic results.
    #[must_use]
    pub fn browser_run(name: String, outcome: &anyhow::Result<()>, duration: Duration) -> Self {
        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => vec![format!("{err:#}")],
        };
        Self {
            scenario_name: name,
            passed: failures.is_empty(),
            iterations_run: 1,
            successful_iterations: usize::from(failures.is_empty()),
            failures,
            average_duration: duration,
            performance_data: vec![duration],
        }
    }
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(&self, scenario: &TestScenario, iterations: usize) -> ScenarioResult {
        if self.verbose {
            println!(
                "🧪 Testing scenario: {} ({iterations} iterations)",
                scenario.name.bright_white()
            );
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            match (scenario.check)(i) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{} passed ({duration:?})", i + 1, iterations);
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {}: {err:#}", i + 1);
                    if self.verbose {
                        println!("  ❌ {}", message.clone().red());
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_ok(_: usize) -> anyhow::Result<()> {
        Ok(())
    }

    fn fails_on_odd(i: usize) -> anyhow::Result<()> {
        anyhow::ensure!(i % 2 == 0, "odd iteration {i}");
        Ok(())
    }

    #[test]
    fn passing_scenario_counts_every_iteration() {
        let scenario = TestScenario::new("Always", always_ok);
        let result = LogicTester::new(false).run_scenario(&scenario, 3);
        assert!(result.passed);
        assert_eq!(result.successful_iterations, 3);
        assert_eq!(result.performance_data.len(), 3);
    }

    #[test]
    fn failures_record_iteration_and_reason() {
        let scenario = TestScenario::new("Odd", fails_on_odd);
        let result = LogicTester::new(false).run_scenario(&scenario, 4);
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 2);
        assert_eq!(result.failures.len(), 2);
        assert!(result.failures[0].contains("Iteration 2"));
        assert!(result.failures[0].contains("odd iteration 1"));
    }

    #[test]
    fn zero_iterations_yield_zero_average() {
        let scenario = TestScenario::new("Empty", always_ok);
        let result = LogicTester::new(false).run_scenario(&scenario, 0);
        assert!(result.passed);
        assert_eq!(result.average_duration, Duration::ZERO);
    }

    #[test]
    fn browser_run_captures_error_chain() {
        let err: anyhow::Result<()> =
            Err(anyhow::anyhow!("inner").context("slide did not advance"));
        let result = ScenarioResult::browser_run("[chrome] x".into(), &err, Duration::ZERO);
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert!(result.failures[0].contains("slide did not advance: inner"));
    }

    #[test]
    fn durations_serialize_as_millis() {
        let result = ScenarioResult::browser_run(
            "ok".into(),
            &Ok(()),
            Duration::from_millis(1500),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 1500);
        assert_eq!(json["performance_data"][0], 1500);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, Duration::from_millis(1500));
    }
}
