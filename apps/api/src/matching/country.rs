//! Country policy: how much each sub-score counts in a given market.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    US,
    FR,
    DE,
    UK,
}

/// Sub-score weights for one country.
///
/// `education` is carried for forward compatibility; the match score formula
/// does not read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountryWeights {
    pub similarity: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

const US_WEIGHTS: CountryWeights = CountryWeights {
    similarity: 0.45,
    skills: 0.35,
    experience: 0.15,
    education: 0.05,
};

const FR_WEIGHTS: CountryWeights = CountryWeights {
    similarity: 0.40,
    skills: 0.25,
    experience: 0.15,
    education: 0.20,
};

const DE_WEIGHTS: CountryWeights = CountryWeights {
    similarity: 0.40,
    skills: 0.25,
    experience: 0.15,
    education: 0.20,
};

const UK_WEIGHTS: CountryWeights = CountryWeights {
    similarity: 0.42,
    skills: 0.30,
    experience: 0.18,
    education: 0.10,
};

impl Country {
    pub const ALL: [Country; 4] = [Country::US, Country::FR, Country::DE, Country::UK];

    pub fn code(self) -> &'static str {
        match self {
            Country::US => "US",
            Country::FR => "FR",
            Country::DE => "DE",
            Country::UK => "UK",
        }
    }

    pub fn weights(self) -> CountryWeights {
        match self {
            Country::US => US_WEIGHTS,
            Country::FR => FR_WEIGHTS,
            Country::DE => DE_WEIGHTS,
            Country::UK => UK_WEIGHTS,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported country code '{0}'. Expected one of: US, FR, DE, UK")]
pub struct UnsupportedCountry(pub String);

impl FromStr for Country {
    type Err = UnsupportedCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnsupportedCountry(code.to_string()))
    }
}

/// Weights for a country code. Unknown codes silently get the US table;
/// reject them beforehand if strictness is needed.
pub fn weights_for(code: &str) -> CountryWeights {
    code.parse::<Country>()
        .map(Country::weights)
        .unwrap_or(US_WEIGHTS)
}
