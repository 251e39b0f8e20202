//! 菜单选项目录
//!
//! 问卷中所有固定选项表。编号从1开始；带"其他"选项的表以最后一项表示
//! 手动描述。

use intake_core::Selection;

/// 编号选项表
#[derive(Debug)]
pub struct OptionTable {
    pub title: &'static str,
    pub options: &'static [&'static str],
    /// 最后一项是否为"其他 (手动描述)"
    pub has_other: bool,
}

impl OptionTable {
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// 按编号取选项文本
    pub fn label(&self, code: usize) -> Option<&'static str> {
        code.checked_sub(1).and_then(|i| self.options.get(i).copied())
    }

    pub fn contains(&self, code: usize) -> bool {
        self.label(code).is_some()
    }

    /// 是否选择了"其他"
    pub fn is_other(&self, code: usize) -> bool {
        self.has_other && code == self.len()
    }

    /// 渲染菜单文本
    pub fn render(&self) -> String {
        let mut menu = format!("--- {} ---", self.title);
        for (i, option) in self.options.iter().enumerate() {
            menu.push_str(&format!("\n{} : {}", i + 1, option));
        }
        menu
    }
}

pub static VISIT_REASONS: OptionTable = OptionTable {
    title: "Reason for Visit",
    options: &[
        "New Diagnosis",
        "Follow-up",
        "Treatment sessions",
        "Side Effects",
        "Results Review",
    ],
    has_other: false,
};

pub static PATHOLOGY_CATEGORIES: OptionTable = OptionTable {
    title: "Clinical Pathology Classification",
    options: &[
        "Carcinoma (Covers Breast, Lung, Prostate, Colon)",
        "Sarcoma (Bone and soft tissue)",
        "Lymphoma (Lymph system)",
        "Leukemia (Blood cancers)",
        "Melanoma (Skin cancer)",
        "Neuroendocrine (Nervous/Endocrine system)",
        "Other / Rare Tumor",
    ],
    has_other: true,
};

pub static STAGES: OptionTable = OptionTable {
    title: "Staging Verification",
    options: &["Stage I", "Stage II", "Stage III", "Stage IV"],
    has_other: false,
};

pub static TREATMENTS: OptionTable = OptionTable {
    title: "Treatment List Verification",
    options: &[
        "chemotherapy",
        "Radiation",
        "Immunotherapy",
        "Hormonal",
        "Targeted Therapy",
        "Supportive Care",
        "Other",
    ],
    has_other: true,
};

pub static MEDICATIONS: OptionTable = OptionTable {
    title: "Medication Verification",
    options: &[
        "Cisplatin, Paclitaxel, 5-Fluorouracil, Doxorubicin, Cyclophosphamide",
        "Pembrolizumab (Keytruda), Nivolumab (Opdivo), Ipilimumab, Atezolizumab",
        "Dexamethasone, Amifostine, Silver Sulfadiazine, Ondansetron",
        "Tamoxifen, Letrozole, Anastrozole, Leuprolide, Goserelin",
        "Trastuzumab, Erlotinib, Imatinib, Bevacizumab, Rituximab",
        "Lorazepam, Prochlorperazine, Morphine, Gabapentin, Metoclopramide",
        "Other",
    ],
    has_other: true,
};

pub static DOSAGES: OptionTable = OptionTable {
    title: "Dosage Verification",
    options: &[
        "5 mg", "10 mg", "25 mg", "50 mg", "100 mg", "250 mg", "500 mg", "Other",
    ],
    has_other: true,
};

pub static FREQUENCIES: OptionTable = OptionTable {
    title: "Medication Frequency Verification",
    options: &[
        "Once daily (Morning)",
        "Once daily (Night)",
        "Twice daily (Every 12 hours)",
        "Three times daily (Every 8 hours)",
        "Four times daily (Every 6 hours)",
        "Weekly",
        "As needed (PRN)",
        "Other",
    ],
    has_other: true,
};

pub static BODY_AREAS: OptionTable = OptionTable {
    title: "Symptom Localization Assessment",
    options: &[
        "Head & Neck (Headaches, dizziness, mouth issues)",
        "Chest & Respiratory (Breathing, heart, or lungs)",
        "Gastrointestinal (Stomach, digestion, or bowel)",
        "Extremities (Arms, legs, joints, or neuropathy)",
        "Systemic (Full body issues like fatigue or fever)",
        "Skin & Integumentary (Rashes, itching, or injection site)",
        "Other",
    ],
    has_other: true,
};

/// 各部位对应的具体症状，下标与 `BODY_AREAS` 编号减一对应
pub static AREA_SYMPTOMS: [OptionTable; 6] = [
    OptionTable {
        title: "Symptom Identification: Head & Neck",
        options: &[
            "Headaches",
            "Dizziness",
            "Mouth Sores",
            "Sore Throat",
            "Difficulty Swallowing",
            "Other",
        ],
        has_other: true,
    },
    OptionTable {
        title: "Symptom Identification: Chest & Respiratory",
        options: &[
            "Shortness of Breath",
            "Chest Pain",
            "Coughing",
            "Palpitations",
            "Other",
        ],
        has_other: true,
    },
    OptionTable {
        title: "Symptom Identification: Gastrointestinal",
        options: &[
            "Nausea",
            "Vomiting",
            "Diarrhea",
            "Constipation",
            "Abdominal Pain",
            "Other",
        ],
        has_other: true,
    },
    OptionTable {
        title: "Symptom Identification: Extremities",
        options: &[
            "Numbness/Tingling",
            "Joint Pain",
            "Swelling (Edema)",
            "Muscle Weakness",
            "Other",
        ],
        has_other: true,
    },
    OptionTable {
        title: "Symptom Identification: Systemic",
        options: &[
            "Fatigue",
            "Fever",
            "Chills",
            "Night Sweats",
            "Weight Loss",
            "Other",
        ],
        has_other: true,
    },
    OptionTable {
        title: "Symptom Identification: Skin & Integumentary",
        options: &[
            "Rash",
            "Dryness",
            "Redness",
            "Itching",
            "Hand-Foot Syndrome",
            "Other",
        ],
        has_other: true,
    },
];

/// 手动描述部位时使用的跨部位症状表
pub static GENERAL_SYMPTOMS: OptionTable = OptionTable {
    title: "Symptom Identification",
    options: &[
        "Head & Neck: Headaches, Dizziness, Mouth Sores, Sore Throat, Difficulty Swallowing",
        "Chest: Shortness of Breath, Chest Pain, Coughing, Palpitations",
        "Gastro: Nausea, Vomiting, Diarrhea, Constipation, Abdominal Pain",
        "Extremities: Numbness/Tingling, Joint Pain, Swelling (Edema), Muscle Weakness",
        "Systemic: Fatigue, Fever, Chills, Night Sweats, Weight Loss",
        "Skin: Rash, Dryness, Redness, Itching, Hand-Foot Syndrome",
        "Other",
    ],
    has_other: true,
};

pub static SEVERITY_GRADES: OptionTable = OptionTable {
    title: "Symptom Severity Assessment",
    options: &[
        "Grade 1: Mild (Asymptomatic or mild symptoms; intervention not indicated)",
        "Grade 2: Moderate (Minimal, local, or non-invasive intervention indicated)",
        "Grade 3: Severe (Severe or medically significant but not immediately life-threatening)",
        "Grade 4: Critical (Life-threatening consequences; urgent intervention indicated)",
        "Other",
    ],
    has_other: true,
};

pub static DURATIONS: OptionTable = OptionTable {
    title: "Symptom Duration Assessment",
    options: &[
        "Less than 24 hours",
        "1 to 3 days",
        "4 to 7 days (1 week)",
        "1 to 2 weeks",
        "More than 2 weeks",
        "Other (Intermittent or specific timeframe)",
    ],
    has_other: true,
};

pub static RECENT_TESTS: OptionTable = OptionTable {
    title: "Recent Medical Tests Verification",
    options: &[
        "Laboratory Work (Blood, Urine, or Stool Analysis)",
        "Diagnostic Imaging (X-Ray, CT, MRI, or Ultrasound)",
        "Pathology (Biopsy or Tissue Sample)",
        "Functional Studies (EKG, ECG, or Stress Test)",
        "None / No recent tests performed",
        "Other",
    ],
    has_other: true,
};

pub static FUNCTIONAL_STATUS: OptionTable = OptionTable {
    title: "Functional Status Assessment",
    options: &[
        "Fully Independent (No impact on daily activities or work)",
        "Modified Independent (Can perform tasks but with pain or extra effort)",
        "Partially Restricted (Requires help with some tasks like lifting or stairs)",
        "Severely Restricted (Unable to perform basic daily activities)",
        "Other",
    ],
    has_other: true,
};

/// 红旗症状清单，顺序固定
pub static RED_FLAGS: [&str; 7] = [
    "Neutropenic Fever: a fever of 100.4°F (38°C) or higher",
    "Respiratory Distress: sudden shortness of breath or sharp chest pain",
    "Neurological Change: new confusion, dizziness, or sudden loss of balance",
    "Hemostatic Failure: active bleeding that won't stop or coughing up blood",
    "Bowel Obstruction: persistent vomiting or an inability to pass stool for over 24 hours",
    "Neuropathy/Cord Compression: new numbness, tingling, or sudden weakness in your legs",
    "Severe Dehydration: unable to keep any liquids down or feeling extremely faint when standing",
];

/// 根据所选部位返回具体症状表
pub fn symptoms_for_area(area: &Selection) -> &'static OptionTable {
    area.code()
        .filter(|code| !BODY_AREAS.is_other(*code))
        .and_then(|code| code.checked_sub(1))
        .and_then(|index| AREA_SYMPTOMS.get(index))
        .unwrap_or(&GENERAL_SYMPTOMS)
}
