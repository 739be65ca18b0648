//! Built-in sample datasets.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};

use crate::error::VizlinkError;

/// A dataset shipped with the library, loadable without any file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDataset {
    /// Artists with regions, genres, followers and collaborations.
    MusicArtists,
    /// Companies with sectors, revenue and business connections.
    PakistaniCompanies,
}

impl SampleDataset {
    /// All sample datasets, in menu order.
    pub const ALL: [SampleDataset; 2] = [SampleDataset::MusicArtists, SampleDataset::PakistaniCompanies];

    /// Stable identifier.
    pub fn name(&self) -> &'static str {
        match self {
            SampleDataset::MusicArtists => "music_artists",
            SampleDataset::PakistaniCompanies => "pakistani_companies",
        }
    }

    /// The raw JSON value, before normalization.
    pub fn value(&self) -> Value {
        match self {
            SampleDataset::MusicArtists => json!([
                {
                    "Artist": "The Vibe",
                    "Region": "Asia",
                    "Genre": "Jazz",
                    "MonthlyConcerts": {
                        "Mar": 2, "Sep": 2, "Nov": 1, "Jun": 3,
                        "Apr": 15, "Dec": 7, "Jan": 12, "Jul": 13
                    },
                    "FollowersInMillions": 19.82,
                    "EarningsInMillionUSD": 4.53,
                    "CollaboratedWith": ["Lady Bass", "Lady Echo", "Professor Storm"]
                },
                {
                    "Artist": "Dr. Groove",
                    "Region": "Oceania",
                    "Genre": "Country",
                    "MonthlyConcerts": {
                        "May": 5, "Mar": 5, "Feb": 12, "Dec": 3,
                        "Sep": 10, "Apr": 1, "Aug": 2, "Jan": 7
                    },
                    "FollowersInMillions": 30.39,
                    "EarningsInMillionUSD": 44.18,
                    "CollaboratedWith": ["The Beat", "Lil Vibe"]
                },
                {
                    "Artist": "Sir Harmony",
                    "Region": "South America",
                    "Genre": "Rock",
                    "MonthlyConcerts": {
                        "Oct": 2, "Nov": 7, "Aug": 0, "Mar": 1,
                        "Jun": 1, "Apr": 3, "Sep": 5, "Jul": 1
                    },
                    "FollowersInMillions": 25.37,
                    "EarningsInMillionUSD": 20.89,
                    "CollaboratedWith": ["DJ Vibe", "Lil Bass", "Young Bass"]
                }
            ]),
            SampleDataset::PakistaniCompanies => json!([
                {
                    "Company": "PakLink",
                    "Region": "Balochistan",
                    "Sector": "Services",
                    "Category": "Agriculture",
                    "Revenue": 2356.69,
                    "Advertising": 795,
                    "MonthlySales": {
                        "May": 923, "Apr": 542, "Jul": 391,
                        "Jun": 837, "Mar": 845, "Jan": 540
                    },
                    "ConnectedTo": ["GrainLine"]
                },
                {
                    "Company": "TranzPak",
                    "Region": "Khyber Pakhtunkhwa",
                    "Sector": "Consumer Goods",
                    "Category": "Electronics",
                    "Revenue": 2015.97,
                    "Advertising": 616,
                    "MonthlySales": {
                        "Jan": 263, "Dec": 292, "Apr": 412,
                        "Jun": 124, "Feb": 488, "Nov": 755
                    },
                    "ConnectedTo": ["PrimeEdge", "PakIT", "CitySolutions", "UrbanTex", "PakSolar"]
                },
                {
                    "Company": "PakIT",
                    "Region": "Punjab",
                    "Sector": "Consumer Goods",
                    "Category": "Furniture",
                    "Revenue": 2005.39,
                    "Advertising": 895,
                    "MonthlySales": {
                        "Oct": 106, "May": 300, "Dec": 602
                    },
                    "ConnectedTo": ["SunTextile", "PakWare", "VisionHub", "UrbanGrow"]
                }
            ]),
        }
    }
}

impl fmt::Display for SampleDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SampleDataset {
    type Err = VizlinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "music_artists" | "music" | "artists" => Ok(SampleDataset::MusicArtists),
            "pakistani_companies" | "companies" => Ok(SampleDataset::PakistaniCompanies),
            _ => Err(VizlinkError::UnknownSample(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("music_artists".parse::<SampleDataset>().unwrap(), SampleDataset::MusicArtists);
        assert_eq!("Pakistani-Companies".parse::<SampleDataset>().unwrap(), SampleDataset::PakistaniCompanies);
        assert!("weather".parse::<SampleDataset>().is_err());
    }

    #[test]
    fn test_samples_are_arrays_of_objects() {
        for sample in SampleDataset::ALL {
            let value = sample.value();
            let items = value.as_array().unwrap();
            assert_eq!(items.len(), 3);
            assert!(items.iter().all(Value::is_object));
        }
    }
}
