//! Web development inquiry
use super::{contact_section, description_field, final_section, opt, t};
use crate::domain::value_objects::ServiceCategory;
use crate::schema::{FieldDefinition, FieldKind, FormSchema, SectionDefinition};

pub(super) fn schema() -> FormSchema {
    FormSchema {
        category: ServiceCategory::WebDevelopment,
        service_name: t("Web Development", "تطوير المواقع"),
        sections: vec![
            contact_section(true),
            SectionDefinition::new(
                "project-details",
                t("Project details", "تفاصيل المشروع"),
                vec![
                    FieldDefinition::new(
                        "websiteType",
                        FieldKind::SingleSelect,
                        t("Website type", "نوع الموقع"),
                    )
                    .required()
                    .options(vec![
                        opt("corporate", "Corporate website", "موقع تعريفي للشركة"),
                        opt("e-commerce", "Online store", "متجر إلكتروني"),
                        opt("landing-page", "Landing page", "صفحة هبوط"),
                        opt("web-app", "Web application", "تطبيق ويب"),
                        opt("portal", "Portal / platform", "بوابة أو منصة"),
                        opt("other", "Other", "أخرى"),
                    ]),
                    description_field(20),
                    FieldDefinition::new(
                        "features",
                        FieldKind::MultiChoiceSet,
                        t("Required features", "الخصائص المطلوبة"),
                    )
                    .required()
                    .options(vec![
                        opt("cms", "Content management", "إدارة المحتوى"),
                        opt("multilingual", "Arabic & English", "العربية والإنجليزية"),
                        opt("payments", "Online payments", "الدفع الإلكتروني"),
                        opt("booking", "Bookings", "الحجوزات"),
                        opt("blog", "Blog", "مدونة"),
                        opt("seo", "SEO", "تحسين محركات البحث"),
                        opt("analytics", "Analytics", "التحليلات"),
                        opt(
                            "integrations",
                            "Third-party integrations",
                            "التكامل مع أنظمة أخرى",
                        ),
                    ]),
                    FieldDefinition::new(
                        "existingWebsite",
                        FieldKind::Url,
                        t("Current website", "الموقع الحالي"),
                    )
                    .placeholder(t("https://", "https://")),
                    FieldDefinition::new(
                        "expectedPages",
                        FieldKind::ShortText,
                        t("Expected number of pages", "عدد الصفحات المتوقع"),
                    )
                    .description(t("A rough count is fine", "يكفي عدد تقريبي"))
                    .pattern(r"^\d+$")
                    .bounds(1.0, 500.0),
                ],
            ),
            SectionDefinition::new(
                "domain-hosting",
                t("Domain & hosting", "النطاق والاستضافة"),
                vec![
                    FieldDefinition::new(
                        "hasDomainHosting",
                        FieldKind::SingleChoiceSet,
                        t("Do you already have a domain and hosting?", "هل لديك نطاق واستضافة؟"),
                    )
                    .required()
                    .options(vec![
                        opt("yes-both", "Yes, both", "نعم، كلاهما"),
                        opt("yes-domain-only", "Domain only", "النطاق فقط"),
                        opt("no", "Neither", "لا أملك أياً منهما"),
                    ]),
                    FieldDefinition::new(
                        "hostingStatus",
                        FieldKind::SingleChoiceSet,
                        t("How should we handle hosting?", "كيف تفضل أن نتعامل مع الاستضافة؟"),
                    )
                    .description(t(
                        "Shown because you have neither a domain nor hosting",
                        "يظهر لأنك لا تملك نطاقاً ولا استضافة",
                    ))
                    .required()
                    .visible_when("hasDomainHosting", &["no"])
                    .options(vec![
                        opt(
                            "manage-for-me",
                            "Register and host it for me",
                            "سجّلوا واستضيفوا الموقع نيابة عني",
                        ),
                        opt("need-advice", "I need advice first", "أحتاج إلى استشارة أولاً"),
                        opt("arrange-myself", "I will arrange it myself", "سأتولى ذلك بنفسي"),
                    ]),
                    FieldDefinition::new(
                        "designReferences",
                        FieldKind::LongText,
                        t("Websites you like", "مواقع تعجبك"),
                    )
                    .length(None, Some(1000)),
                ],
            ),
            final_section(true),
        ],
    }
}
