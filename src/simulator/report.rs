//! Simulation report generation.

use super::result::SimulationResult;
use crate::error::SimError;
use crate::profile::{Capability, CapabilityProfile};
use crate::stages::{ExpectedOutcome, Stage, StageModel, StageTable};
use serde::Serialize;

/// Width of the bar charts, in characters.
const BAR_WIDTH: usize = 40;

/// A simulation result together with what produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub profile: CapabilityProfile,
    /// Per-stage survival probability used by the rollouts.
    pub stage_probabilities: StageTable<f64>,
    /// Exact outcome distribution the Monte Carlo run estimates.
    pub expected: ExpectedOutcome,
    pub result: SimulationResult,
}

impl SimReport {
    pub fn new(
        profile: &CapabilityProfile,
        model: &StageModel,
        result: SimulationResult,
    ) -> Result<Self, SimError> {
        Ok(Self {
            profile: *profile,
            stage_probabilities: model.survival_table(profile)?,
            expected: model.expected_outcome(profile)?,
            result,
        })
    }

    /// Survival rate the model predicts, in percent.
    pub fn expected_survival_rate(&self) -> f64 {
        self.expected.survival * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let result = &self.result;
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 STARTUP SURVIVAL SIMULATION\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Rollouts: {} (seed {})\n\n",
            result.iterations, result.seed
        ));

        report.push_str("── SUMMARY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Survival Rate:    {:.1}%  (model: {:.1}%)\n",
            result.survival_rate,
            self.expected_survival_rate()
        ));
        report.push_str(&format!(
            "  Needs:            {}/100\n",
            self.profile.get(Capability::ConsumerNeeds)
        ));
        report.push_str(&format!(
            "  Bottleneck:       {}\n\n",
            result.bottleneck_stage
        ));

        report.push_str("── CAPABILITIES ─────────────────────────────────────────────────\n");
        for (capability, score) in self.profile.iter() {
            report.push_str(&format!(
                "  {:<10} {:>3}  {}\n",
                capability.label(),
                score,
                bar(f64::from(score) / 100.0)
            ));
        }
        report.push('\n');

        report.push_str("── DEATH FUNNEL ─────────────────────────────────────────────────\n");
        let max_deaths = result.death_counts.values().copied().max().unwrap_or(0);
        for (stage, &deaths) in result.death_counts.iter() {
            let fill = if max_deaths == 0 {
                0.0
            } else {
                deaths as f64 / max_deaths as f64
            };
            report.push_str(&format!("  {:<9} {:>7}  {}\n", stage.name(), deaths, bar(fill)));
        }
        report.push('\n');

        report.push_str("── PER-STAGE BREAKDOWN ──────────────────────────────────────────\n");
        report.push_str("  Stage      Pass %   Died %   Model %\n");
        report.push_str("  ─────      ──────   ──────   ───────\n");
        for stage in Stage::ALL {
            report.push_str(&format!(
                "  {:<9} {:>6.1}   {:>6.1}   {:>7.1}\n",
                stage.name(),
                self.stage_probabilities[stage] * 100.0,
                result.death_share(stage) * 100.0,
                self.expected.death[stage] * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── ASSESSMENT ───────────────────────────────────────────────────\n");
        let verdict = if result.survival_rate < 1.0 {
            "DOA - almost nothing makes it through"
        } else if result.survival_rate < 5.0 {
            "LONG SHOT - typical for a venture"
        } else if result.survival_rate < 20.0 {
            "CONTENDER - better odds than most"
        } else {
            "OUTLIER - unusually strong profile"
        };
        report.push_str(&format!("  Verdict:         {}\n", verdict));

        let weakest = self
            .profile
            .iter()
            .min_by_key(|&(_, score)| score)
            .map(|(capability, _)| capability)
            .unwrap_or(Capability::Product);
        report.push_str(&format!(
            "  Weakest Area:    {} ({}/100)\n",
            weakest.label(),
            self.profile.get(weakest)
        ));
        if result.death_counts[result.bottleneck_stage] > 0 {
            report.push_str(&format!(
                "  ⚠️  {:.1}% of all ventures die at {}\n",
                result.death_share(result.bottleneck_stage) * 100.0,
                result.bottleneck_stage
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn bar(fill: f64) -> String {
    let len = (fill.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}
