/// Cloud providers and the regions a cluster can be deployed to.
pub struct Catalog {
    providers: Vec<(&'static str, Vec<&'static str>)>,
}

pub const AWS: &str = "AWS";
pub const GCP: &str = "GCP";
pub const AZURE: &str = "AZURE";

pub const TIERS: [&str; 8] = ["M2", "M5", "M10", "M20", "M30", "M40", "M50", "M60"];
pub const MDB_VERSIONS: [&str; 4] = ["4.2", "4.4", "5.0", "6.0"];

impl Catalog {
    // TODO: fetch from the provider regions endpoint once an API client is wired in
    pub fn discover() -> Self {
        Self {
            providers: vec![
                (
                    AWS,
                    vec![
                        "US_EAST_1",
                        "US_EAST_2",
                        "US_WEST_2",
                        "EU_WEST_1",
                        "EU_CENTRAL_1",
                        "AP_SOUTHEAST_2",
                    ],
                ),
                (
                    GCP,
                    vec![
                        "CENTRAL_US",
                        "EASTERN_US",
                        "WESTERN_EUROPE",
                        "EASTERN_ASIA_PACIFIC",
                    ],
                ),
                (AZURE, vec!["US_EAST_2", "US_WEST", "EUROPE_NORTH", "ASIA_EAST"]),
            ],
        }
    }

    pub fn providers(&self) -> Vec<&'static str> {
        self.providers.iter().map(|(name, _)| *name).collect()
    }

    pub fn regions(&self, provider: &str) -> &[&'static str] {
        self.providers
            .iter()
            .find(|(name, _)| *name == provider)
            .map(|(_, regions)| regions.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_by_provider() {
        let catalog = Catalog::discover();
        assert_eq!(catalog.providers(), vec![AWS, GCP, AZURE]);
        assert!(catalog.regions(AWS).contains(&"US_EAST_1"));
        assert!(!catalog.regions(GCP).contains(&"US_EAST_1"));
        assert!(catalog.regions("ALIBABA").is_empty());
    }
}
