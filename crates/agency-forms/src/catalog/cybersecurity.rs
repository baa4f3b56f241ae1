//! Cybersecurity solutions inquiry
use super::{contact_section, description_field, final_section, opt, t};
use crate::domain::value_objects::ServiceCategory;
use crate::schema::{FieldDefinition, FieldKind, FormSchema, SectionDefinition};

pub(super) fn schema() -> FormSchema {
    FormSchema {
        category: ServiceCategory::CybersecuritySolutions,
        service_name: t("Cybersecurity Solutions", "حلول الأمن السيبراني"),
        sections: vec![
            contact_section(true),
            SectionDefinition::new(
                "security-scope",
                t("Security scope", "نطاق الخدمة الأمنية"),
                vec![
                    FieldDefinition::new(
                        "securityServices",
                        FieldKind::MultiChoiceSet,
                        t("Services needed", "الخدمات المطلوبة"),
                    )
                    .required()
                    .options(vec![
                        opt("penetration-testing", "Penetration testing", "اختبار الاختراق"),
                        opt(
                            "vulnerability-assessment",
                            "Vulnerability assessment",
                            "تقييم الثغرات",
                        ),
                        opt("security-audit", "Security audit", "التدقيق الأمني"),
                        opt("compliance", "Compliance consulting", "استشارات الامتثال"),
                        opt("incident-response", "Incident response", "الاستجابة للحوادث"),
                        opt("security-training", "Awareness training", "التدريب والتوعية"),
                    ]),
                    FieldDefinition::new(
                        "infrastructure",
                        FieldKind::MultiSelect,
                        t("Infrastructure in scope", "البنية التحتية المشمولة"),
                    )
                    .options(vec![
                        opt("cloud", "Cloud", "سحابية"),
                        opt("on-premise", "On-premise", "محلية"),
                        opt("hybrid", "Hybrid", "هجينة"),
                        opt("web-apps", "Web applications", "تطبيقات الويب"),
                        opt("mobile-apps", "Mobile applications", "تطبيقات الجوال"),
                    ]),
                    FieldDefinition::new(
                        "complianceStandards",
                        FieldKind::MultiSelect,
                        t("Compliance standards", "معايير الامتثال"),
                    )
                    .options(vec![
                        opt("iso-27001", "ISO 27001", "ISO 27001"),
                        opt("pci-dss", "PCI DSS", "PCI DSS"),
                        opt("nca-ecc", "NCA ECC", "الضوابط الأساسية للأمن السيبراني"),
                        opt("gdpr", "GDPR", "GDPR"),
                        opt("none", "None", "لا يوجد"),
                    ]),
                    description_field(20),
                ],
            ),
            SectionDefinition::new(
                "incident-history",
                t("Incident history", "سجل الحوادث"),
                vec![
                    FieldDefinition::new(
                        "hadIncident",
                        FieldKind::SingleChoiceSet,
                        t(
                            "Have you had a security incident recently?",
                            "هل تعرضت لحادث أمني مؤخراً؟",
                        ),
                    )
                    .required()
                    .options(vec![opt("yes", "Yes", "نعم"), opt("no", "No", "لا")]),
                    FieldDefinition::new(
                        "incidentDetails",
                        FieldKind::LongText,
                        t("What happened?", "ماذا حدث؟"),
                    )
                    .required()
                    .length(Some(10), Some(2000))
                    .visible_when("hadIncident", &["yes"]),
                ],
            ),
            final_section(true),
        ],
    }
}
