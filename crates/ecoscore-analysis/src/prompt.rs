//! Prompt construction for the model-backed analysis request.

use ecoscore_core::Product;

/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str = "You are an environmental impact assessment expert. \
    Analyze products and provide detailed environmental scores and recommendations \
    based on manufacturing, materials, supply chain, and sustainability factors.";

/// Build the user prompt for a product.
///
/// Optional fields are omitted entirely when absent; the JSON structure at
/// the end is the wire contract the reply parser depends on.
pub fn build_prompt(product: &Product) -> String {
    let mut prompt = format!(
        "Analyze the environmental impact of the following product and provide a comprehensive assessment:\n\n\
         Product Name: {}\n\
         Category: {}\n\
         Description: {}\n",
        product.name, product.category, product.description
    );

    if let Some(manufacturer) = &product.manufacturer {
        prompt.push_str(&format!("Manufacturer: {}\n", manufacturer));
    }
    if let Some(location) = &product.manufacturing_location {
        prompt.push_str(&format!("Manufacturing Location: {}\n", location));
    }
    if let Some(materials) = product.materials.as_deref().filter(|m| !m.is_empty()) {
        prompt.push_str(&format!("Materials: {}\n", materials.join(", ")));
    }
    if let Some(info) = &product.supply_chain_info {
        prompt.push_str(&format!("Supply Chain Info: {}\n", info));
    }

    prompt.push_str(
        "\nPlease provide:\n\
         1. Environmental scores (0-100, where 100 is most eco-friendly):\n\
            - Carbon Footprint\n\
            - Water Usage\n\
            - Energy Consumption\n\
            - Recyclability\n\
            - Sustainability\n\
            - Overall Score\n\n\
         2. Key insights about the environmental impact (3-5 points)\n\n\
         3. Recommendations for improvement or more sustainable alternatives (3-5 points)\n\n\
         Format your response as JSON with the following structure:\n\
         {\n\
           \"scores\": {\n\
             \"carbonFootprint\": number,\n\
             \"waterUsage\": number,\n\
             \"energyConsumption\": number,\n\
             \"recyclability\": number,\n\
             \"sustainability\": number,\n\
             \"overall\": number\n\
           },\n\
           \"insights\": [\"insight1\", \"insight2\", ...],\n\
           \"recommendations\": [\"recommendation1\", \"recommendation2\", ...]\n\
         }",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoscore_core::Category;

    fn bare_product() -> Product {
        Product {
            id: 1,
            user_id: 1,
            name: "Desk Lamp".into(),
            description: "An LED desk lamp".into(),
            category: Category::Electronics,
            manufacturer: None,
            manufacturing_location: None,
            materials: None,
            supply_chain_info: None,
            created_at: 0,
            updated_at: None,
        }
    }

    #[test]
    fn test_optional_lines_omitted_when_absent() {
        let prompt = build_prompt(&bare_product());
        assert!(!prompt.contains("Manufacturer:"));
        assert!(!prompt.contains("Manufacturing Location:"));
        assert!(!prompt.contains("Materials:"));
        assert!(!prompt.contains("Supply Chain"));
    }

    #[test]
    fn test_empty_materials_list_is_omitted() {
        let mut product = bare_product();
        product.materials = Some(vec![]);
        assert!(!build_prompt(&product).contains("Materials:"));
    }

    #[test]
    fn test_optional_lines_present_when_set() {
        let mut product = bare_product();
        product.manufacturer = Some("Lumen Co".into());
        product.materials = Some(vec!["aluminum".into(), "glass".into()]);
        product.supply_chain_info = Some("Assembled in one plant".into());

        let prompt = build_prompt(&product);
        assert!(prompt.contains("Manufacturer: Lumen Co\n"));
        assert!(prompt.contains("Materials: aluminum, glass\n"));
        assert!(prompt.contains("Supply Chain Info: Assembled in one plant\n"));
    }

    #[test]
    fn test_wire_contract_keys_present() {
        let prompt = build_prompt(&bare_product());
        for key in [
            "\"scores\"",
            "\"carbonFootprint\"",
            "\"waterUsage\"",
            "\"energyConsumption\"",
            "\"recyclability\"",
            "\"sustainability\"",
            "\"overall\"",
            "\"insights\"",
            "\"recommendations\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
    }
}
