/*!
Runtime configuration: built-in defaults, then an optional TOML file named
by `ASISTECH_CONFIG`, then individual environment overrides.
*/
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;

/// Fixed delays (milliseconds, before scaling) of the simulated calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub registration: u64,
    pub teacher_save: u64,
    pub parent_query: u64,
    pub parent_report: u64,
    pub admin_generate: u64,
    pub admin_export: u64,
    pub student_profile: u64,
    pub student_save: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            registration: 2000,
            teacher_save: 1500,
            parent_query: 1500,
            parent_report: 2000,
            admin_generate: 2000,
            admin_export: 2500,
            student_profile: 2000,
            student_save: 1500,
        }
    }
}

impl Delays {
    pub fn scaled(self, scale: f64) -> Self {
        let s = |ms: u64| (ms as f64 * scale).round() as u64;
        Self {
            registration: s(self.registration),
            teacher_save: s(self.teacher_save),
            parent_query: s(self.parent_query),
            parent_report: s(self.parent_report),
            admin_generate: s(self.admin_generate),
            admin_export: s(self.admin_export),
            student_profile: s(self.student_profile),
            student_save: s(self.student_save),
        }
    }

    pub fn zero() -> Self {
        Self::default().scaled(0.0)
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    delay_scale: Option<f64>,
    seed: Option<u64>,
    registration_success_rate: Option<f64>,
    checkin_success_rate: Option<f64>,
    delays: Option<Delays>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cfg {
    pub delay_scale: f64,
    pub seed: Option<u64>,
    pub registration_success_rate: f64,
    pub checkin_success_rate: f64,
    pub delays: Delays,
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            delay_scale: 1.0,
            seed: None,
            registration_success_rate: 0.9,
            checkin_success_rate: 0.95,
            delays: Delays::default(),
        }
    }
}

impl Cfg {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let cf: ConfigFile = toml::from_str(text).context("Unable to deserialize config file")?;
        let mut c = Self::default();
        if let Some(x) = cf.delay_scale {
            c.delay_scale = x;
        }
        if cf.seed.is_some() {
            c.seed = cf.seed;
        }
        if let Some(x) = cf.registration_success_rate {
            c.registration_success_rate = x;
        }
        if let Some(x) = cf.checkin_success_rate {
            c.checkin_success_rate = x;
        }
        if let Some(d) = cf.delays {
            c.delays = d;
        }
        c.check()?;
        Ok(c)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then `ASISTECH_CONFIG`, then the single-value variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut c = match std::env::var("ASISTECH_CONFIG") {
            Ok(p) => Self::from_file(p)?,
            Err(_) => Self::default(),
        };
        c.apply_overrides(|k| std::env::var(k).ok())?;
        Ok(c)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(s) = var("ASISTECH_DELAY_SCALE") {
            self.delay_scale = s
                .trim()
                .parse()
                .map_err(|e| anyhow!("Error parsing ASISTECH_DELAY_SCALE {:?}: {}", s, e))?;
        }
        if let Some(s) = var("ASISTECH_SEED") {
            self.seed = Some(
                s.trim()
                    .parse()
                    .map_err(|e| anyhow!("Error parsing ASISTECH_SEED {:?}: {}", s, e))?,
            );
        }
        if let Some(s) = var("ASISTECH_SUCCESS_RATE") {
            let rate: f64 = s
                .trim()
                .parse()
                .map_err(|e| anyhow!("Error parsing ASISTECH_SUCCESS_RATE {:?}: {}", s, e))?;
            self.registration_success_rate = rate;
            self.checkin_success_rate = rate;
        }
        self.check()
    }

    fn check(&self) -> anyhow::Result<()> {
        if !(self.delay_scale >= 0.0 && self.delay_scale.is_finite()) {
            return Err(anyhow!("delay_scale must be a non-negative number"));
        }
        for (name, rate) in [
            ("registration_success_rate", self.registration_success_rate),
            ("checkin_success_rate", self.checkin_success_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(anyhow!("{} must be in 0..=1", name));
            }
        }
        Ok(())
    }

    pub fn effective_delays(&self) -> Delays {
        self.delays.scaled(self.delay_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_only_what_it_names() {
        let c = Cfg::from_toml_str(
            "delay_scale = 0.5\nseed = 7\n[delays]\nregistration = 100\n",
        )
        .unwrap();
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.delays.registration, 100);
        assert_eq!(c.delays.admin_export, 2500);
        assert_eq!(c.effective_delays().registration, 50);
        assert_eq!(c.registration_success_rate, 0.9);
    }

    #[test]
    fn env_success_rate_sets_both() {
        let mut c = Cfg::default();
        c.apply_overrides(|k| match k {
            "ASISTECH_SUCCESS_RATE" => Some("1".into()),
            "ASISTECH_DELAY_SCALE" => Some("0".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(c.registration_success_rate, 1.0);
        assert_eq!(c.checkin_success_rate, 1.0);
        assert_eq!(c.effective_delays(), Delays::zero());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Cfg::from_toml_str("registration_success_rate = 1.5").is_err());
        assert!(Cfg::from_toml_str("delay_scale = -1.0").is_err());
        let mut c = Cfg::default();
        assert!(c
            .apply_overrides(|k| (k == "ASISTECH_SEED").then(|| "nope".to_string()))
            .is_err());
    }
}
