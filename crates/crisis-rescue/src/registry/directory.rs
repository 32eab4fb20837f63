use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    pub id: String,
    pub resource: String,
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ngo {
    pub id: String,
    pub name: String,
}

/// Read-only partner directory served to the dashboard.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    donors: Vec<Donor>,
    ngos: Vec<Ngo>,
}

impl Directory {
    pub fn new(donors: Vec<Donor>, ngos: Vec<Ngo>) -> Self {
        Self { donors, ngos }
    }

    pub fn seeded() -> Self {
        Self::new(
            vec![
                Donor {
                    id: "D1".to_string(),
                    resource: "Food Packets".to_string(),
                    qty: 100,
                },
                Donor {
                    id: "D2".to_string(),
                    resource: "Medicine Kits".to_string(),
                    qty: 50,
                },
            ],
            vec![
                Ngo {
                    id: "NGO1".to_string(),
                    name: "Food Relief Org".to_string(),
                },
                Ngo {
                    id: "NGO2".to_string(),
                    name: "Medical Aid Network".to_string(),
                },
            ],
        )
    }

    pub fn donors(&self) -> &[Donor] {
        &self.donors
    }

    pub fn ngos(&self) -> &[Ngo] {
        &self.ngos
    }
}
