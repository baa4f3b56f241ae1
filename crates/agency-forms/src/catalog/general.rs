//! General inquiry
use super::{contact_section, description_field, final_section, t};
use crate::domain::value_objects::ServiceCategory;
use crate::schema::{FieldDefinition, FieldKind, FormSchema, SectionDefinition};

pub(super) fn schema() -> FormSchema {
    FormSchema {
        category: ServiceCategory::GeneralInquiry,
        service_name: t("General Inquiry", "استفسار عام"),
        sections: vec![
            contact_section(false),
            SectionDefinition::new(
                "inquiry",
                t("Your inquiry", "استفسارك"),
                vec![
                    FieldDefinition::new("subject", FieldKind::ShortText, t("Subject", "الموضوع"))
                        .length(None, Some(150)),
                    description_field(10),
                ],
            ),
            final_section(false),
        ],
    }
}
