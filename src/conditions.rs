use crate::errors::Error;

const T0_K: f64 = 288.15;
const P0_PA: f64 = 101_325.0;
const G_M_S2: f64 = 9.80665;
const R_AIR: f64 = 287.05;
const LAPSE_K_M: f64 = 0.0065;
const TROPOPAUSE_M: f64 = 11_000.0;
const T_STRATO_K: f64 = 216.65;
const P_TROPOPAUSE_PA: f64 = 22_632.06;
const GAMMA: f64 = 1.4;

/// Atmospheric state at an altitude, from the International Standard
/// Atmosphere with an optional temperature offset, plus the derived flow
/// parameters a solver run needs. Covers the troposphere (linear lapse) and
/// the lower stratosphere (isothermal, exponential pressure decay).
#[derive(Clone, Copy, Debug)]
pub struct FlightConditions {
    pub altitude_m: f64,
    pub delta_isa_k: f64,
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
    pub viscosity_kg_ms: f64,
}

impl FlightConditions {
    pub fn from_altitude(altitude_m: f64, delta_isa_k: f64) -> Result<FlightConditions, Error> {
        if !altitude_m.is_finite() || altitude_m < 0.0 {
            return Err(Error::InvalidParameters(format!(
                "altitude = {} m must be non-negative",
                altitude_m
            )));
        }

        let (t_isa, pressure) = if altitude_m <= TROPOPAUSE_M {
            let t_isa = T0_K - LAPSE_K_M * altitude_m;
            let p = P0_PA * (t_isa / T0_K).powf(G_M_S2 / (R_AIR * LAPSE_K_M));
            (t_isa, p)
        } else {
            let t = T_STRATO_K + delta_isa_k;
            let p = P_TROPOPAUSE_PA
                * (-G_M_S2 * (altitude_m - TROPOPAUSE_M) / (R_AIR * t)).exp();
            (T_STRATO_K, p)
        };

        let temperature = t_isa + delta_isa_k;
        let density = pressure / (R_AIR * temperature);
        // Sutherland's law
        let viscosity = 1.458e-6 * temperature.powf(1.5) / (temperature + 110.4);

        Ok(FlightConditions {
            altitude_m,
            delta_isa_k,
            temperature_k: temperature,
            pressure_pa: pressure,
            density_kg_m3: density,
            viscosity_kg_ms: viscosity,
        })
    }

    pub fn speed_of_sound(&self) -> f64 {
        (GAMMA * R_AIR * self.temperature_k).sqrt()
    }

    pub fn mach(&self, speed_m_s: f64) -> f64 {
        speed_m_s / self.speed_of_sound()
    }

    /// Reynolds number of a section of the given chord at the given speed.
    pub fn reynolds(&self, speed_m_s: f64, chord_m: f64) -> f64 {
        self.density_kg_m3 * speed_m_s * chord_m / self.viscosity_kg_ms
    }
}
