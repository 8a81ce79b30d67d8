//! Static name tables. Each upstream dataset spells country names its own
//! way, so the tables are kept apart and never merged.

/// Nextstrain country names mapped to the reference `Country_Name`. Keys are
/// already transliterated to ASCII.
pub const NEXTSTRAIN_TO_REFERENCE: &[(&str, &str)] = &[
    ("Armenia", "Armenia, Republic of"),
    ("Azerbaijan", "Azerbaijan, Republic of"),
    ("Cabo Verde", "Cape Verde, Republic of"),
    ("China", "China, People's Republic of"),
    ("Cyprus", "Cyprus, Republic of"),
    ("Curacao", "Curaçao"),
    ("Democratic Republic of the Congo", "Congo, Democratic Republic of the"),
    ("Republic of the Congo", "Congo, Republic of the"),
    ("Dominica", "Dominica, Commonwealth of"),
    ("Dominican Republic", "Dominican Republic"),
    ("Eswatini", "Swaziland, Kingdom of"),
    ("Georgia", "Georgia"),
    ("Guinea", "Guinea, Republic of"),
    ("India", "India, Republic of"),
    ("Iraq", "Iraq, Republic of"),
    ("Ireland", "Ireland"),
    ("Kazakhstan", "Kazakhstan, Republic of"),
    ("Kyrgyzstan", "Kyrgyz Republic"),
    ("Laos", "Lao People's Democratic Republic"),
    ("Netherlands", "Netherlands, Kingdom of the"),
    ("Niger", "Niger, Republic of"),
    ("Nigeria", "Nigeria, Federal Republic of"),
    // officially the Republic of North Macedonia
    ("North Macedonia", "Macedonia, The Former Yugoslav Republic of"),
    ("Russia", "Russian Federation"),
    ("Saudi Arabia", "Saudi Arabia, Kingdom of"),
    ("South Korea", "Korea, Republic of"),
    ("Sudan", "Sudan, Republic of"),
    ("Turkey", "Turkey, Republic of"),
    ("Union of the Comoros", "Comoros, Union of the"),
    ("UK", "United Kingdom of Great Britain & Northern Ireland"),
    ("USA", "United States of America"),
];

/// GISAID country names (as written in the metadata) mapped to the reference
/// `Country_Name`. Used for ISO-3 lookups, which require an exact hit.
pub const GISAID_TO_REFERENCE: &[(&str, &str)] = &[
    ("Algeria", "Algeria, People's Democratic Republic of"),
    ("Angola", "Angola, Republic of"),
    ("Benin", "Benin, Republic of"),
    ("Botswana", "Botswana, Republic of"),
    ("Burkina Faso", "Burkina Faso"),
    ("Burundi", "Burundi, Republic of"),
    ("Cabo Verde", "Cape Verde, Republic of"),
    ("Cameroon", "Cameroon, Republic of"),
    ("Côte d'Ivoire", "Cote d'Ivoire, Republic of"),
    ("Central African Republic", "Central African Republic"),
    ("Chad", "Chad, Republic of"),
    ("Democratic Republic of the Congo", "Congo, Democratic Republic of the"),
    ("Djibouti", "Djibouti, Republic of"),
    ("Egypt", "Egypt, Arab Republic of"),
    ("Equatorial Guinea", "Equatorial Guinea, Republic of"),
    ("Eswatini", "Swaziland, Kingdom of"),
    ("Ethiopia", "Ethiopia, Federal Democratic Republic of"),
    ("Gabon", "Gabon, Gabonese Republic"),
    ("Gambia", "Gambia, Republic of the"),
    ("Ghana", "Ghana, Republic of"),
    ("Guinea", "Guinea, Republic of"),
    ("Guinea-Bissau", "Guinea-Bissau, Republic of"),
    ("Kenya", "Kenya, Republic of"),
    ("Lesotho", "Lesotho, Kingdom of"),
    ("Liberia", "Liberia, Republic of"),
    ("Libya", "Libyan Arab Jamahiriya"),
    ("Madagascar", "Madagascar, Republic of"),
    ("Malawi", "Malawi, Republic of"),
    ("Mali", "Mali, Republic of"),
    ("Mauritania", "Mauritania, Islamic Republic of"),
    ("Mauritius", "Mauritius, Republic of"),
    ("Morocco", "Morocco, Kingdom of"),
    ("Mozambique", "Mozambique, Republic of"),
    ("Namibia", "Namibia, Republic of"),
    ("Niger", "Niger, Republic of"),
    ("Nigeria", "Nigeria, Federal Republic of"),
    ("Republic of the Congo", "Congo, Republic of the"),
    ("Rwanda", "Rwanda, Republic of"),
    ("Sao Tome and Principe", "Sao Tome and Principe, Democratic Republic of"),
    ("Senegal", "Senegal, Republic of"),
    ("Seychelles", "Seychelles, Republic of"),
    ("Sierra Leone", "Sierra Leone, Republic of"),
    ("Somalia", "Somalia, Somali Republic"),
    ("South Africa", "South Africa, Republic of"),
    ("South Sudan", "South Sudan"),
    ("Sudan", "Sudan, Republic of"),
    ("Tanzania", "Tanzania, United Republic of"),
    ("Togo", "Togo, Togolese Republic"),
    ("Tunisia", "Tunisia, Tunisian Republic"),
    ("Uganda", "Uganda, Republic of"),
    ("Union of the Comoros", "Comoros, Union of the"),
    ("Zambia", "Zambia, Republic of"),
    ("Zimbabwe", "Zimbabwe, Republic of"),
];

/// GISAID names whose ISO-2 code cannot be found by substring search.
pub const GISAID_TWO_LETTER_SEEDS: &[(&str, &str)] = &[
    ("Union of the Comoros", "KM"),
    ("Republic of the Congo", "CG"),
    ("Côte d'Ivoire", "CI"),
    ("Democratic Republic of the Congo", "CD"),
    ("Eswatini", "SZ"),
    ("Guinea", "GN"),
];

pub struct TerritoryOverride {
    pub name: &'static str,
    pub continent: &'static str,
    pub iso2: &'static str,
}

/// Territories missing from the reference table.
pub const TERRITORY_OVERRIDES: &[TerritoryOverride] = &[
    // XK is the user-assigned code in common use
    TerritoryOverride {
        name: "Kosovo",
        continent: "Europe",
        iso2: "XK",
    },
    // UN observer state
    TerritoryOverride {
        name: "Palestine",
        continent: "Asia",
        iso2: "PS",
    },
];
