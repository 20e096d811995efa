//! Coefficient records for the two supported Magic Formula schemas.
//!
//! The schema is picked once from the shape of the record: a `camber` block
//! or polynomial `a1..a8` keys select the Bakker schema, anything else must be
//! a complete simple schema.

use crate::imports::*;

/// Per-axis coefficients of the simple schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimpleAxis {
    /// Stiffness, normalized by C D when the model is evaluated
    #[serde(rename = "B")]
    pub b: f64,
    /// Shape factor
    #[serde(rename = "C")]
    pub c: f64,
    /// Peak force as a fraction of mu Fz
    #[serde(rename = "D_factor")]
    pub d_factor: f64,
    /// Curvature factor
    #[serde(rename = "E")]
    pub e: f64,
}

/// Lateral coefficients of the simple schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimpleLateralAxis {
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D_factor")]
    pub d_factor: f64,
    #[serde(rename = "E")]
    pub e: f64,
    /// Fraction of lateral peak force lost per unit of longitudinal slip
    pub combined_reduction: f64,
}

/// Simple D/B/C/E schema, scaled by a friction coefficient at evaluation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SimpleCoefficients {
    pub longitudinal: SimpleAxis,
    pub lateral: SimpleLateralAxis,
}

/// Per-axis polynomial coefficients of the Bakker schema. Polynomials take
/// vertical load in kN.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BakkerAxis {
    #[serde(rename = "C")]
    pub c: f64,
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    pub a4: f64,
    pub a5: f64,
    pub a6: f64,
    pub a7: f64,
    pub a8: f64,
}

/// Camber block shared by the Bakker schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CamberCoefficients {
    /// Horizontal shift per unit camber
    pub a9: f64,
    /// Vertical shift, quadratic load term
    pub a10: f64,
    /// Vertical shift, linear load term
    pub a11: f64,
    /// Stiffness loss per unit |camber|
    pub a12: f64,
}

/// Bakker a1..a12 polynomial schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BakkerCoefficients {
    pub longitudinal: BakkerAxis,
    pub lateral: BakkerAxis,
    pub camber: CamberCoefficients,
}

/// A coefficient record in exactly one of the supported schemas.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TyreCoefficients {
    Simple(SimpleCoefficients),
    Bakker(BakkerCoefficients),
}

impl TyreCoefficients {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::Bakker(_) => "bakker",
        }
    }

    fn named_values(&self) -> Vec<(String, f64)> {
        fn bakker_axis(axis: &str, a: &BakkerAxis) -> Vec<(String, f64)> {
            [
                ("C", a.c),
                ("a1", a.a1),
                ("a2", a.a2),
                ("a3", a.a3),
                ("a4", a.a4),
                ("a5", a.a5),
                ("a6", a.a6),
                ("a7", a.a7),
                ("a8", a.a8),
            ]
            .iter()
            .map(|(k, v)| (format!("{axis}.{k}"), *v))
            .collect()
        }

        match self {
            Self::Simple(s) => {
                let lon = &s.longitudinal;
                let lat = &s.lateral;
                vec![
                    ("longitudinal.B".into(), lon.b),
                    ("longitudinal.C".into(), lon.c),
                    ("longitudinal.D_factor".into(), lon.d_factor),
                    ("longitudinal.E".into(), lon.e),
                    ("lateral.B".into(), lat.b),
                    ("lateral.C".into(), lat.c),
                    ("lateral.D_factor".into(), lat.d_factor),
                    ("lateral.E".into(), lat.e),
                    ("lateral.combined_reduction".into(), lat.combined_reduction),
                ]
            }
            Self::Bakker(bk) => {
                let mut vals = bakker_axis("longitudinal", &bk.longitudinal);
                vals.extend(bakker_axis("lateral", &bk.lateral));
                vals.extend([
                    ("camber.a9".to_string(), bk.camber.a9),
                    ("camber.a10".to_string(), bk.camber.a10),
                    ("camber.a11".to_string(), bk.camber.a11),
                    ("camber.a12".to_string(), bk.camber.a12),
                ]);
                vals
            }
        }
    }

    /// Every coefficient must be a finite number.
    pub fn validate(&self) -> anyhow::Result<()> {
        let bad: Vec<String> = self
            .named_values()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(k, v)| format!("{k} = {v}"))
            .collect();
        ensure!(
            bad.is_empty(),
            TyreError::InvalidConfig(format!(
                "{} coefficients must be finite: {}",
                self.variant_name(),
                bad.join(", ")
            ))
        );
        Ok(())
    }
}

impl SerdeAPI for TyreCoefficients {
    fn init(&mut self) -> anyhow::Result<()> {
        self.validate()
    }
}

impl TryFrom<serde_json::Value> for TyreCoefficients {
    type Error = anyhow::Error;

    fn try_from(value: serde_json::Value) -> anyhow::Result<Self> {
        let is_bakker = {
            let record = value.as_object().ok_or_else(|| {
                TyreError::InvalidConfig(format!(
                    "coefficient record must be a mapping, got {value}"
                ))
            })?;
            record.contains_key("camber")
                || ["longitudinal", "lateral"].iter().any(|axis| {
                    record
                        .get(*axis)
                        .and_then(|a| a.as_object())
                        .map_or(false, |a| a.contains_key("a1"))
                })
        };
        let coeffs = if is_bakker {
            Self::Bakker(serde_json::from_value(value).map_err(|err| {
                TyreError::InvalidConfig(format!("bakker coefficients: {err}"))
            })?)
        } else {
            Self::Simple(serde_json::from_value(value).map_err(|err| {
                TyreError::InvalidConfig(format!("simple coefficients: {err}"))
            })?)
        };
        coeffs.validate()?;
        Ok(coeffs)
    }
}

impl<'de> Deserialize<'de> for TyreCoefficients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
