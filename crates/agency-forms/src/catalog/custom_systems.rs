//! Custom systems inquiry
use super::{contact_section, description_field, final_section, opt, t};
use crate::domain::value_objects::ServiceCategory;
use crate::schema::{FieldDefinition, FieldKind, FormSchema, SectionDefinition};

pub(super) fn schema() -> FormSchema {
    FormSchema {
        category: ServiceCategory::CustomSystems,
        service_name: t("Custom Systems", "الأنظمة المخصصة"),
        sections: vec![
            contact_section(true),
            SectionDefinition::new(
                "system-requirements",
                t("System requirements", "متطلبات النظام"),
                vec![
                    FieldDefinition::new(
                        "systemType",
                        FieldKind::SingleSelect,
                        t("System type", "نوع النظام"),
                    )
                    .required()
                    .options(vec![
                        opt("erp", "ERP", "تخطيط موارد المؤسسة"),
                        opt("crm", "CRM", "إدارة علاقات العملاء"),
                        opt("inventory", "Inventory", "إدارة المخزون"),
                        opt("hr", "HR & payroll", "الموارد البشرية والرواتب"),
                        opt("booking", "Booking & scheduling", "الحجوزات والمواعيد"),
                        opt("lms", "Learning management", "إدارة التعلم"),
                        opt("other", "Other", "أخرى"),
                    ]),
                    description_field(20),
                    FieldDefinition::new(
                        "currentSolution",
                        FieldKind::SingleSelect,
                        t("What do you use today?", "ما الذي تستخدمه حالياً؟"),
                    )
                    .options(vec![
                        opt("spreadsheets", "Spreadsheets", "جداول البيانات"),
                        opt("legacy-software", "Legacy software", "برامج قديمة"),
                        opt("paper-based", "Paper-based", "ورقي"),
                        opt("none", "Nothing yet", "لا شيء حالياً"),
                    ]),
                    FieldDefinition::new(
                        "integrationNeeds",
                        FieldKind::MultiSelect,
                        t("Integrations", "التكاملات"),
                    )
                    .options(vec![
                        opt("accounting", "Accounting", "المحاسبة"),
                        opt("payment-gateway", "Payment gateway", "بوابة الدفع"),
                        opt("sms", "SMS", "الرسائل النصية"),
                        opt("government-platforms", "Government platforms", "المنصات الحكومية"),
                        opt("erp", "Existing ERP", "نظام ERP الحالي"),
                    ]),
                    FieldDefinition::new(
                        "expectedUsers",
                        FieldKind::ShortText,
                        t("Expected number of users", "عدد المستخدمين المتوقع"),
                    )
                    .pattern(r"^\d+$")
                    .bounds(1.0, 100_000.0),
                ],
            ),
            final_section(true),
        ],
    }
}
