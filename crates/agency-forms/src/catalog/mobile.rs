//! Mobile app development inquiry
use super::{contact_section, description_field, final_section, opt, t, yes_no_unsure};
use crate::domain::value_objects::ServiceCategory;
use crate::schema::{FieldDefinition, FieldKind, FormSchema, SectionDefinition};

pub(super) fn schema() -> FormSchema {
    FormSchema {
        category: ServiceCategory::MobileAppDevelopment,
        service_name: t("Mobile App Development", "تطوير تطبيقات الجوال"),
        sections: vec![
            contact_section(true),
            SectionDefinition::new(
                "app-details",
                t("App details", "تفاصيل التطبيق"),
                vec![
                    FieldDefinition::new(
                        "platforms",
                        FieldKind::MultiChoiceSet,
                        t("Target platforms", "المنصات المستهدفة"),
                    )
                    .required()
                    .options(vec![
                        opt("ios", "iOS", "iOS"),
                        opt("android", "Android", "أندرويد"),
                        opt("cross-platform", "Cross-platform", "متعدد المنصات"),
                    ]),
                    FieldDefinition::new(
                        "appCategory",
                        FieldKind::SingleSelect,
                        t("App category", "فئة التطبيق"),
                    )
                    .required()
                    .options(vec![
                        opt("e-commerce", "E-commerce", "تجارة إلكترونية"),
                        opt("on-demand", "On-demand services", "خدمات عند الطلب"),
                        opt("social", "Social / community", "تواصل اجتماعي"),
                        opt("business", "Business / productivity", "أعمال وإنتاجية"),
                        opt("other", "Other", "أخرى"),
                    ]),
                    description_field(20),
                    FieldDefinition::new(
                        "needsBackend",
                        FieldKind::SingleChoiceSet,
                        t("Do you need an admin dashboard?", "هل تحتاج إلى لوحة تحكم؟"),
                    )
                    .required()
                    .options(yes_no_unsure()),
                ],
            ),
            final_section(true),
        ],
    }
}
