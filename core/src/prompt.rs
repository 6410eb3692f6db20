//! Research prompt for the web-search model.

use serde_json::Value;

use crate::config::ResearchConfig;
use crate::prospect::{Geography, HEADERS, STATUS_TO_CONTACT};

/// Value hint shown for each column in the example output object.
fn column_hint(header: &str) -> &'static str {
    match header {
        "Nome Azienda" => "company name",
        "Città" => "city",
        "Indirizzo" => "street, postal code, city (empty string if unknown)",
        "Telefono" => "+XX ... (empty string if unknown)",
        "Email" => "email address (empty string if unknown)",
        "Sito Web" => "website domain without https (empty string if unknown)",
        "Tipo" => {
            "Dealer / GaLaBau / Paesaggista / Fachhandel / SHK / E-commerce / Produttore / Associazione / Cooperativa"
        }
        "Marchi Concorrenti Usati" => "Brand1, Brand2 (empty string if unknown)",
        "Servizi Offerti" => "brief description of services relevant to the brand",
        "Mercato Target" => "Residenziale / Agricoltura / Sport / Verde pubblico / B2B",
        "Priorità" => "ALTA or MEDIA or BASSA",
        "Note Commerciali" => "useful commercial notes in Italian for the sales team",
        "Nome Contatto" => "contact person name (empty string if unknown)",
        "Stato" => STATUS_TO_CONTACT,
        _ => "",
    }
}

/// `{"companies": [ {...} ]}` example with one hinted entry, keys in column order.
fn output_example() -> String {
    let fields: Vec<String> = HEADERS
        .iter()
        .map(|header| {
            format!(
                "      {}: {}",
                Value::String((*header).to_string()),
                Value::String(column_hint(header).to_string())
            )
        })
        .collect();
    format!(
        "{{\n  \"companies\": [\n    {{\n{}\n    }}\n  ]\n}}",
        fields.join(",\n")
    )
}

/// Builds the single prompt sent to the model for `geography`.
pub fn build_research_prompt(geography: &Geography, research: &ResearchConfig) -> String {
    let brand = &research.brand;
    let company = &research.company;
    let location = geography.location_label();
    let min = research.min_companies;
    let max = research.max_companies;
    let brands = research.competitor_brands.join(", ");
    let example = output_example();

    format!(
        "You are a B2B sales research assistant for {brand} ({company}), a manufacturer of \
irrigation products: drip and micro-irrigation, sprinklers, pumps, fittings and controllers.

Use web search to find {min}-{max} REAL companies located in or serving {location} that could \
buy or resell {brand} irrigation products. Only include companies you can verify exist.

Company types to look for:
- irrigation dealers, distributors and installers
- landscape contractors (GaLaBau in Germany, paysagistes in France, paesaggisti in Italy, \
jardineros in Spain, hoveniers in the Netherlands) that install irrigation
- specialized garden and irrigation retailers (Fachhandel)
- agricultural irrigation companies and agricultural cooperatives
- online B2B platforms and e-commerce shops selling irrigation products
- industry associations relevant to irrigation or landscaping

Competitor brands: {brands}.

Priority rules:
- ALTA: the company openly sells, installs or uses one or more competitor brands
- MEDIA: installer or dealer without declared brands, landscape contractor with irrigation \
services, cooperative, e-commerce
- BASSA: plumber or SHK firm with irrigation as a secondary service, landscaper doing \
maintenance only, association

Return ONLY valid JSON, with no markdown and no explanation, in exactly this shape:
{example}

Use exactly these keys for every company. Set \"Stato\" to \"{STATUS_TO_CONTACT}\" for every company."
    )
}
