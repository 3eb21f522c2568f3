use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAccount {
    pub account_id: String,
    pub account_name: String,
    #[serde(default)]
    pub account_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingProduct {
    pub product_id: String,
    pub product_name: String,
}

/// A customer review. `status` is 1 when visible, 0 when hidden by moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub rating_id: String,
    pub account: RatingAccount,
    pub product: RatingProduct,
    #[serde(default)]
    pub order_item_id: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub rating_star: u8,
    pub status: i32,
    #[serde(default, with = "crate::model::datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::model::datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub account_id: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_item_id: Option<String>,
    pub comment: String,
    pub rating_star: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingRequest {
    pub comment: String,
    pub status: i32,
    pub rating_star: u8,
}

/// Client-side filter applied to a fetched rating page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingFilter {
    pub star: Option<u8>,
    pub status: Option<i32>,
    /// Case-insensitive match against comment, account name and product name.
    pub keyword: Option<String>,
}

impl RatingFilter {
    pub fn matches(&self, rating: &Rating) -> bool {
        if self.star.is_some_and(|star| star != rating.rating_star) {
            return false;
        }
        if self.status.is_some_and(|status| status != rating.status) {
            return false;
        }
        match self.keyword.as_deref().map(str::trim) {
            Some(keyword) if !keyword.is_empty() => {
                let needle = keyword.to_lowercase();
                [
                    rating.comment.as_str(),
                    rating.account.account_name.as_str(),
                    rating.product.product_name.as_str(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rating(star: u8, status: i32, comment: &str) -> Rating {
        Rating {
            rating_id: "r1".into(),
            account: RatingAccount {
                account_id: "a1".into(),
                account_name: "Minh Anh".into(),
                account_phone: None,
            },
            product: RatingProduct {
                product_id: "p1".into(),
                product_name: "Gà rán".into(),
            },
            order_item_id: None,
            comment: comment.into(),
            rating_star: star,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[rstest]
    #[case(RatingFilter::default(), true)]
    #[case(RatingFilter { star: Some(5), ..Default::default() }, true)]
    #[case(RatingFilter { star: Some(4), ..Default::default() }, false)]
    #[case(RatingFilter { status: Some(0), ..Default::default() }, false)]
    #[case(RatingFilter { keyword: Some("GIÒN".into()), ..Default::default() }, true)]
    #[case(RatingFilter { keyword: Some("minh".into()), ..Default::default() }, true)]
    #[case(RatingFilter { keyword: Some("pizza".into()), ..Default::default() }, false)]
    #[case(RatingFilter { keyword: Some("  ".into()), ..Default::default() }, true)]
    fn test_filter(#[case] filter: RatingFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&rating(5, 1, "Rất giòn, ngon")), expected);
    }
}
