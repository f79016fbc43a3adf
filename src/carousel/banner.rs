use super::{DisplayType, GroupingContext, OTHER_PAGE_ID};

/// Page id that ends up in banner ids and in the exported payload.
pub fn effective_page_id(ctx: &GroupingContext) -> &str {
    if ctx.page_id == OTHER_PAGE_ID {
        ctx.custom_page_id.trim()
    } else {
        &ctx.page_id
    }
}

/// Default banner id for the entry at `index`:
/// `{category}_{pageId}_{position or 0}` plus `_{index}` for carousels.
pub fn derive_banner_id(ctx: &GroupingContext, index: usize) -> String {
    let position = match ctx.position.trim() {
        "" => "0",
        trimmed => trimmed,
    };
    let base = format!("{}_{}_{}", ctx.category, effective_page_id(ctx), position);

    match ctx.display_type {
        DisplayType::Carousel => format!("{base}_{index}"),
        DisplayType::Single => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(category: &str, page_id: &str, position: &str, display_type: DisplayType) -> GroupingContext {
        GroupingContext {
            display_type,
            category: category.to_string(),
            page_id: page_id.to_string(),
            position: position.to_string(),
            ..GroupingContext::default()
        }
    }

    #[test]
    fn test_carousel_ids_carry_index() {
        let ctx = ctx("luxury", "Cart", "2", DisplayType::Carousel);
        assert_eq!(derive_banner_id(&ctx, 0), "luxury_Cart_2_0");
        assert_eq!(derive_banner_id(&ctx, 7), "luxury_Cart_2_7");
    }

    #[test]
    fn test_single_ids_have_no_suffix() {
        let ctx = ctx("luxury", "Wishlist", " 4 ", DisplayType::Single);
        assert_eq!(derive_banner_id(&ctx, 3), "luxury_Wishlist_4");
    }

    #[test]
    fn test_custom_page_id_and_missing_position() {
        let mut ctx = ctx("fashion", OTHER_PAGE_ID, "", DisplayType::Carousel);
        ctx.custom_page_id = "  Summer Sale ".to_string();
        assert_eq!(effective_page_id(&ctx), "Summer Sale");
        assert_eq!(derive_banner_id(&ctx, 0), "fashion_Summer Sale_0_0");
    }

    #[test]
    fn test_custom_page_id_ignored_for_catalogue_pages() {
        let mut ctx = ctx("fashion", "Search", "1", DisplayType::Single);
        ctx.custom_page_id = "unused".to_string();
        assert_eq!(derive_banner_id(&ctx, 0), "fashion_Search_1");
    }
}
