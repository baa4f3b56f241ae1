//! Built-in inquiry catalog
//!
//! Every schema opens with the contact section, continues with
//! service-specific sections and closes with the final-details section that
//! carries the privacy consent.

mod custom_systems;
mod cybersecurity;
mod general;
mod mobile;
mod web_development;

use crate::domain::value_objects::LocalizedText;
use crate::schema::{FieldDefinition, FieldKind, FieldOption, FormSchema, SectionDefinition};

/// All built-in schemas, in display order
pub fn all() -> Vec<FormSchema> {
    vec![
        web_development::schema(),
        mobile::schema(),
        custom_systems::schema(),
        cybersecurity::schema(),
        general::schema(),
    ]
}

pub(crate) fn t(en: &str, ar: &str) -> LocalizedText {
    LocalizedText::new(en, ar)
}

pub(crate) fn opt(value: &str, en: &str, ar: &str) -> FieldOption {
    FieldOption { value: value.to_string(), label: t(en, ar) }
}

pub(crate) fn yes_no_unsure() -> Vec<FieldOption> {
    vec![
        opt("yes", "Yes", "نعم"),
        opt("no", "No", "لا"),
        opt("not-sure", "Not sure", "غير متأكد"),
    ]
}

pub(crate) fn contact_section(industry_required: bool) -> SectionDefinition {
    let mut industry = FieldDefinition::new(
        "industry",
        FieldKind::SingleSelect,
        t("Industry", "القطاع"),
    )
    .placeholder(t("Select your industry", "اختر القطاع"))
    .options(vec![
        opt("technology", "Technology", "التقنية"),
        opt("healthcare", "Healthcare", "الرعاية الصحية"),
        opt("education", "Education", "التعليم"),
        opt("retail", "Retail & E-commerce", "التجزئة والتجارة الإلكترونية"),
        opt("finance", "Finance", "المالية"),
        opt("real-estate", "Real estate", "العقارات"),
        opt("government", "Government", "القطاع الحكومي"),
        opt("hospitality", "Hospitality", "الضيافة"),
        opt("other", "Other", "أخرى"),
    ]);
    if industry_required {
        industry = industry.required();
    }

    SectionDefinition::new(
        "contact-info",
        t("Contact information", "معلومات التواصل"),
        vec![
            FieldDefinition::new("fullName", FieldKind::ShortText, t("Full name", "الاسم الكامل"))
                .placeholder(t("Your full name", "اسمك الكامل"))
                .required()
                .length(Some(2), Some(100)),
            FieldDefinition::new(
                "companyName",
                FieldKind::ShortText,
                t("Company name", "اسم الشركة"),
            )
            .placeholder(t("Your company or organization", "شركتك أو مؤسستك"))
            .required()
            .length(Some(2), Some(100)),
            FieldDefinition::new("email", FieldKind::Email, t("Email", "البريد الإلكتروني"))
                .placeholder(t("name@company.com", "name@company.com"))
                .required(),
            FieldDefinition::new("phone", FieldKind::Phone, t("Phone", "رقم الهاتف"))
                .placeholder(t("+966 5X XXX XXXX", "+966 5X XXX XXXX")),
            FieldDefinition::new(
                "preferredContact",
                FieldKind::SingleChoiceSet,
                t("Preferred contact method", "طريقة التواصل المفضلة"),
            )
            .options(vec![
                opt("email", "Email", "البريد الإلكتروني"),
                opt("call", "Phone call", "مكالمة هاتفية"),
                opt("whatsapp", "WhatsApp", "واتساب"),
            ]),
            industry,
        ],
    )
    .with_description(t(
        "Tell us who you are and how to reach you.",
        "عرّفنا بنفسك وكيف يمكننا التواصل معك.",
    ))
}

pub(crate) fn description_field(min: usize) -> FieldDefinition {
    FieldDefinition::new(
        "description",
        FieldKind::LongText,
        t("Project description", "وصف المشروع"),
    )
    .placeholder(t(
        "Describe your goals, audience and anything we should know",
        "صف أهدافك وجمهورك وأي تفاصيل يجب أن نعرفها",
    ))
    .required()
    .length(Some(min), Some(2000))
}

pub(crate) fn final_section(ask_budget: bool) -> SectionDefinition {
    let mut fields = Vec::new();
    if ask_budget {
        fields.push(
            FieldDefinition::new(
                "budgetRange",
                FieldKind::SingleSelect,
                t("Budget range", "نطاق الميزانية"),
            )
            .required()
            .options(vec![
                opt("under-5k", "Under $5,000", "أقل من 5,000$"),
                opt("5k-15k", "$5,000 - $15,000", "5,000$ - 15,000$"),
                opt("15k-50k", "$15,000 - $50,000", "15,000$ - 50,000$"),
                opt("50k-plus", "Over $50,000", "أكثر من 50,000$"),
                opt("not-sure", "Not sure yet", "لم أحدد بعد"),
            ]),
        );
        fields.push(
            FieldDefinition::new(
                "timeline",
                FieldKind::SingleSelect,
                t("Timeline", "الإطار الزمني"),
            )
            .required()
            .options(vec![
                opt("asap", "As soon as possible", "في أقرب وقت"),
                opt("1-3-months", "1 - 3 months", "1 - 3 أشهر"),
                opt("3-6-months", "3 - 6 months", "3 - 6 أشهر"),
                opt("flexible", "Flexible", "مرن"),
            ]),
        );
    }
    fields.push(
        FieldDefinition::new(
            "preferredContactTime",
            FieldKind::SingleChoiceSet,
            t("Best time to reach you", "أفضل وقت للتواصل"),
        )
        .options(vec![
            opt("morning", "Morning", "صباحاً"),
            opt("afternoon", "Afternoon", "ظهراً"),
            opt("evening", "Evening", "مساءً"),
        ]),
    );
    fields.push(
        FieldDefinition::new(
            "additionalComments",
            FieldKind::LongText,
            t("Additional comments", "ملاحظات إضافية"),
        )
        .length(None, Some(2000)),
    );
    fields.push(
        FieldDefinition::new(
            "agreedToPrivacy",
            FieldKind::Checkbox,
            t("I agree to the privacy policy", "أوافق على سياسة الخصوصية"),
        )
        .required(),
    );

    SectionDefinition::new("final-details", t("Final details", "التفاصيل النهائية"), fields)
}
