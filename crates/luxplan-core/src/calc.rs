// ── Illuminance calculator ──
//
// Lumen method: fixtures = ceil(E × A / (Φ × BF)), where E is the required
// illuminance in lux, A the floor area in m², Φ the lamp's rated flux and
// BF the ballast factor.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{Lamp, Room, SubRoom};

/// Ballast factor used when none (or a non-number) is supplied.
pub const DEFAULT_BALLAST_FACTOR: f64 = 0.8;

/// Largest fixture count the calculator reports (2^53, the last integer an
/// `f64` holds exactly).
const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

/// How the fixture count and total wattage are derived.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CalcMode {
    /// Fixture count from the lumen formula; wattage from lamps only.
    #[default]
    Direct,
    /// Fixture count computed or entered by hand; wattage also includes
    /// auxiliary outlets.
    Mixed,
}

/// Mixed-mode knobs. Ignored in direct mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeOptions {
    /// Compute the fixture count with the lumen formula instead of
    /// taking `manual_count`.
    pub auto_calculate: bool,
    /// Hand-entered fixture count, truncated. Negative or non-finite → 0.
    pub manual_count: Option<f64>,
    /// Number of auxiliary power outlets, truncated. Missing or
    /// non-finite → 0.
    pub aux_outlet_count: Option<f64>,
    /// Wattage per auxiliary outlet. Missing or non-finite → 0.
    pub aux_outlet_watt: Option<f64>,
}

/// Everything the calculator needs besides the catalog selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcInput {
    pub length_m: f64,
    pub width_m: f64,
    /// `None` or non-finite → [`DEFAULT_BALLAST_FACTOR`].
    pub ballast_factor: Option<f64>,
    pub mode: CalcMode,
    pub options: ModeOptions,
}

impl CalcInput {
    /// Direct-mode input with the default ballast factor.
    pub fn direct(length_m: f64, width_m: f64) -> Self {
        Self {
            length_m,
            width_m,
            ballast_factor: None,
            mode: CalcMode::Direct,
            options: ModeOptions::default(),
        }
    }

    /// Mixed-mode input with the default ballast factor.
    pub fn mixed(length_m: f64, width_m: f64, options: ModeOptions) -> Self {
        Self {
            mode: CalcMode::Mixed,
            options,
            ..Self::direct(length_m, width_m)
        }
    }

    pub fn with_ballast_factor(mut self, factor: f64) -> Self {
        self.ballast_factor = Some(factor);
        self
    }
}

/// Structured calculator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub fixture_count: u64,
    /// Lamps plus auxiliary outlets, in watts.
    pub total_wattage: f64,
    /// Auxiliary outlet share of `total_wattage` (0 in direct mode).
    pub aux_wattage: f64,
    pub required_lux: f64,
    pub area_m2: f64,
    pub ballast_factor: f64,
    pub mode: CalcMode,
}

/// Compute fixture count and total wattage.
///
/// Checks run in a fixed order and the first failure is returned:
/// dimensions, room, lamp, ballast factor, then (only when the formula is
/// used) lamp lumen. Dimensions whose product overflows are invalid, and a
/// fixture count that does not fit is [`CoreError::FixtureCountOutOfRange`].
pub fn calculate(
    input: &CalcInput,
    room: Option<&Room>,
    sub_room: Option<&SubRoom>,
    lamp: Option<&Lamp>,
) -> Result<Calculation, CoreError> {
    let (length, width) = (input.length_m, input.width_m);
    if !(is_positive(length) && is_positive(width)) {
        return Err(CoreError::InvalidDimensions { length, width });
    }
    let room = room.ok_or(CoreError::NoRoomSelected)?;
    let lamp = lamp.ok_or(CoreError::NoLampSelected)?;
    let ballast_factor = resolve_ballast_factor(input.ballast_factor)?;

    let required_lux = sub_room.map_or(room.required_lux, |s| s.required_lux);
    let area_m2 = length * width;
    if !area_m2.is_finite() {
        return Err(CoreError::InvalidDimensions { length, width });
    }

    let (fixture_count, aux_wattage) = match input.mode {
        CalcMode::Direct => (
            lumen_method(required_lux, area_m2, lamp, ballast_factor)?,
            0.0,
        ),
        CalcMode::Mixed => {
            let opts = &input.options;
            let count = if opts.auto_calculate {
                lumen_method(required_lux, area_m2, lamp, ballast_factor)?
            } else {
                whole_count(opts.manual_count)?
            };
            let aux = or_zero(opts.aux_outlet_count).trunc() * or_zero(opts.aux_outlet_watt);
            (count, aux)
        }
    };

    Ok(Calculation {
        fixture_count,
        total_wattage: as_f64(fixture_count) * lamp.watt + aux_wattage,
        aux_wattage,
        required_lux,
        area_m2,
        ballast_factor,
        mode: input.mode,
    })
}

/// `ceil(lux × area / (lumen × ballast))`. Refuses a non-positive lumen
/// rather than dividing by zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn lumen_method(lux: f64, area: f64, lamp: &Lamp, ballast: f64) -> Result<u64, CoreError> {
    if !is_positive(lamp.lumen) {
        return Err(CoreError::InvalidLampLumen {
            lamp: lamp.name.clone(),
            lumen: lamp.lumen,
        });
    }
    let raw = ((lux * area) / (lamp.lumen * ballast)).ceil();
    if !(raw.is_finite() && raw <= MAX_COUNT) {
        return Err(CoreError::FixtureCountOutOfRange { value: raw });
    }
    Ok(raw as u64)
}

fn resolve_ballast_factor(value: Option<f64>) -> Result<f64, CoreError> {
    match value {
        Some(v) if v.is_finite() && v <= 0.0 => Err(CoreError::InvalidBallastFactor { value: v }),
        Some(v) if v.is_finite() => Ok(v),
        _ => Ok(DEFAULT_BALLAST_FACTOR),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn whole_count(value: Option<f64>) -> Result<u64, CoreError> {
    let count = or_zero(value).trunc();
    if count > MAX_COUNT {
        return Err(CoreError::FixtureCountOutOfRange { value: count });
    }
    Ok(count as u64)
}

/// Missing, non-finite or negative → 0.
fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn as_f64(n: u64) -> f64 {
    n as f64
}

// ── Presentation ────────────────────────────────────────────────────

/// Display record for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `"Room"` or `"Room / Sub-room"`.
    pub room: String,
    pub required_lux: f64,
    pub area_m2: f64,
    pub lamp: String,
    pub fixture_count: u64,
    pub total_wattage: f64,
    pub aux_wattage: f64,
    pub ballast_factor: f64,
    pub mode: CalcMode,
}

impl Summary {
    pub fn new(calc: &Calculation, room: &Room, sub_room: Option<&SubRoom>, lamp: &Lamp) -> Self {
        let room_label = match sub_room {
            Some(sub) => format!("{} / {}", room.name, sub.name),
            None => room.name.clone(),
        };
        Self {
            room: room_label,
            required_lux: calc.required_lux,
            area_m2: calc.area_m2,
            lamp: lamp.describe(),
            fixture_count: calc.fixture_count,
            total_wattage: calc.total_wattage,
            aux_wattage: calc.aux_wattage,
            ballast_factor: calc.ballast_factor,
            mode: calc.mode,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn room(lux: f64) -> Room {
        Room {
            key: "ruangtamu".into(),
            category: "Rumah".into(),
            name: "Ruang Tamu".into(),
            required_lux: lux,
            fixture_count_hint: 0,
            sub_rooms: vec![SubRoom {
                key: "baca".into(),
                name: "Sudut Baca".into(),
                required_lux: 300.0,
                fixture_count_hint: 0,
            }],
        }
    }

    fn lamp(watt: f64, lumen: f64) -> Lamp {
        Lamp {
            name: "TL-D".into(),
            watt,
            lumen,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn direct_mode_rounds_up() {
        // 250 lx × 20 m² / (2500 lm × 0.8) = 2.5 → 3
        let calc = calculate(
            &CalcInput::direct(5.0, 4.0),
            Some(&room(250.0)),
            None,
            Some(&lamp(36.0, 2500.0)),
        )
        .unwrap();
        assert_eq!(calc.fixture_count, 3);
        assert_eq!(calc.total_wattage, 108.0);
        assert_eq!(calc.area_m2, 20.0);
        assert_eq!(calc.ballast_factor, DEFAULT_BALLAST_FACTOR);
    }

    #[test]
    fn exact_quotient_is_not_bumped() {
        // 100 lx × 16 m² / (1000 lm × 0.8) = 2
        let calc = calculate(
            &CalcInput::direct(4.0, 4.0),
            Some(&room(100.0)),
            None,
            Some(&lamp(10.0, 1000.0)),
        )
        .unwrap();
        assert_eq!(calc.fixture_count, 2);
    }

    #[test]
    fn sub_room_lux_overrides_room() {
        let r = room(100.0);
        let calc = calculate(
            &CalcInput::direct(5.0, 4.0),
            Some(&r),
            r.sub_rooms.first(),
            Some(&lamp(10.0, 1000.0)),
        )
        .unwrap();
        assert_eq!(calc.required_lux, 300.0);
        // 300 × 20 / 800 = 7.5 → 8
        assert_eq!(calc.fixture_count, 8);
    }

    #[test]
    fn mixed_manual_count_adds_aux_outlets() {
        let input = CalcInput::mixed(
            5.0,
            4.0,
            ModeOptions {
                auto_calculate: false,
                manual_count: Some(5.0),
                aux_outlet_count: Some(2.0),
                aux_outlet_watt: Some(100.0),
            },
        );
        let calc = calculate(&input, Some(&room(250.0)), None, Some(&lamp(18.0, 0.0))).unwrap();
        assert_eq!(calc.fixture_count, 5);
        assert_eq!(calc.aux_wattage, 200.0);
        assert_eq!(calc.total_wattage, 290.0);
    }

    #[test]
    fn mixed_auto_uses_lumen_method() {
        let input = CalcInput::mixed(
            5.0,
            4.0,
            ModeOptions {
                auto_calculate: true,
                manual_count: Some(99.0),
                aux_outlet_count: Some(1.0),
                aux_outlet_watt: None,
            },
        );
        let calc =
            calculate(&input, Some(&room(250.0)), None, Some(&lamp(18.0, 2500.0))).unwrap();
        assert_eq!(calc.fixture_count, 3);
        assert_eq!(calc.total_wattage, 54.0);
    }

    #[test]
    fn mixed_manual_count_is_clamped() {
        for bad in [Some(-3.0), Some(f64::NAN), Some(f64::INFINITY), None] {
            let input = CalcInput::mixed(
                2.0,
                2.0,
                ModeOptions {
                    manual_count: bad,
                    ..ModeOptions::default()
                },
            );
            let calc =
                calculate(&input, Some(&room(100.0)), None, Some(&lamp(10.0, 0.0))).unwrap();
            assert_eq!(calc.fixture_count, 0, "manual_count = {bad:?}");
            assert_eq!(calc.total_wattage, 0.0);
        }
    }

    #[test]
    fn zero_lumen_is_an_error_not_nan() {
        let err = calculate(
            &CalcInput::direct(5.0, 4.0),
            Some(&room(250.0)),
            None,
            Some(&lamp(18.0, 0.0)),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidLampLumen { .. }));

        let input = CalcInput::mixed(
            5.0,
            4.0,
            ModeOptions {
                auto_calculate: true,
                ..ModeOptions::default()
            },
        );
        let err = calculate(&input, Some(&room(250.0)), None, Some(&lamp(18.0, 0.0))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLampLumen { .. }));
    }

    #[test]
    fn invalid_dimensions() {
        for (l, w) in [(0.0, 3.0), (3.0, -1.0), (f64::NAN, 3.0), (3.0, f64::INFINITY)] {
            let err = calculate(
                &CalcInput::direct(l, w),
                Some(&room(100.0)),
                None,
                Some(&lamp(10.0, 1000.0)),
            )
            .unwrap_err();
            assert!(matches!(err, CoreError::InvalidDimensions { .. }), "{l} x {w}");
        }
    }

    #[test]
    fn overflowing_area_is_invalid() {
        let err = calculate(
            &CalcInput::direct(1e200, 1e200),
            Some(&room(100.0)),
            None,
            Some(&lamp(10.0, 1000.0)),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimensions { .. }));
    }

    #[test]
    fn huge_fixture_count_is_out_of_range() {
        // finite area, but 1e300 lx over 1e-300 lm does not fit a count
        let err = calculate(
            &CalcInput::direct(10.0, 10.0),
            Some(&room(1e300)),
            None,
            Some(&lamp(10.0, 1e-300)),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::FixtureCountOutOfRange { .. }));

        let input = CalcInput::mixed(
            4.0,
            3.0,
            ModeOptions {
                manual_count: Some(1e20),
                ..ModeOptions::default()
            },
        );
        let err = calculate(&input, Some(&room(100.0)), None, Some(&lamp(10.0, 0.0))).unwrap_err();
        assert!(matches!(err, CoreError::FixtureCountOutOfRange { .. }));
    }

    #[test]
    fn fractional_aux_outlets_are_truncated() {
        let input = CalcInput::mixed(
            4.0,
            3.0,
            ModeOptions {
                manual_count: Some(1.0),
                aux_outlet_count: Some(2.5),
                aux_outlet_watt: Some(100.0),
                ..ModeOptions::default()
            },
        );
        let calc = calculate(&input, Some(&room(100.0)), None, Some(&lamp(10.0, 0.0))).unwrap();
        assert_eq!(calc.aux_wattage, 200.0);
        assert_eq!(calc.total_wattage, 210.0);
    }

    #[test]
    fn missing_selection() {
        let input = CalcInput::direct(3.0, 3.0);
        assert!(matches!(
            calculate(&input, None, None, Some(&lamp(10.0, 1000.0))),
            Err(CoreError::NoRoomSelected)
        ));
        assert!(matches!(
            calculate(&input, Some(&room(100.0)), None, None),
            Err(CoreError::NoLampSelected)
        ));
    }

    #[test]
    fn ballast_factor_defaults_and_validation() {
        let r = room(100.0);
        let l = lamp(10.0, 1000.0);

        let nan = CalcInput::direct(4.0, 4.0).with_ballast_factor(f64::NAN);
        assert_eq!(
            calculate(&nan, Some(&r), None, Some(&l)).unwrap().ballast_factor,
            DEFAULT_BALLAST_FACTOR
        );

        // 100 × 16 / (1000 × 0.5) = 3.2 → 4
        let half = CalcInput::direct(4.0, 4.0).with_ballast_factor(0.5);
        assert_eq!(calculate(&half, Some(&r), None, Some(&l)).unwrap().fixture_count, 4);

        let zero = CalcInput::direct(4.0, 4.0).with_ballast_factor(0.0);
        assert!(matches!(
            calculate(&zero, Some(&r), None, Some(&l)),
            Err(CoreError::InvalidBallastFactor { .. })
        ));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("direct".parse::<CalcMode>().unwrap(), CalcMode::Direct);
        assert_eq!("Mixed".parse::<CalcMode>().unwrap(), CalcMode::Mixed);
        assert_eq!(CalcMode::Mixed.to_string(), "mixed");
    }

    #[test]
    fn summary_labels() {
        let r = room(100.0);
        let l = lamp(10.0, 1000.0);
        let calc = calculate(&CalcInput::direct(4.0, 4.0), Some(&r), r.sub_rooms.first(), Some(&l))
            .unwrap();

        let summary = Summary::new(&calc, &r, r.sub_rooms.first(), &l);
        assert_eq!(summary.room, "Ruang Tamu / Sudut Baca");
        assert_eq!(summary.lamp, "TL-D (10 W, 1000 lm)");
        assert_eq!(Summary::new(&calc, &r, None, &l).room, "Ruang Tamu");
    }
}
