//! Values shared by several resource groups.

api_enum! {
    /// Sort order for list endpoints.
    SortDirection {
        Asc => "asc",
        Desc => "desc",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spelling() {
        assert_eq!(SortDirection::Desc.to_string(), "desc");
        assert_eq!(serde_json::to_value(SortDirection::Asc).unwrap(), "asc");
        let parsed: SortDirection = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(parsed, SortDirection::Desc);
        assert!(serde_json::from_str::<SortDirection>(r#""up""#).is_err());
    }
}
