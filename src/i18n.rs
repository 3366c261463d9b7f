use serde::{Deserialize, Serialize};

/// Display language for all user-visible text. The language never feeds a
/// computation; it only selects labels at render time.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum,
)]
pub enum Lang {
    /// English
    #[default]
    En,
    /// Bangla
    Bn,
}

/// Keys for every translated string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    Title,
    FatherBloodGroup,
    MotherBloodGroup,
    RhWarningTitle,
    RhWarningBody,
    ShowAdvanced,

    OtherSystems,
    KellTitle,
    MnTitle,
    DuffyTitle,
    SelectorFather,
    SelectorMother,

    OutcomeProbabilities,

    AboSquareTitle,
    AboSquareDesc,
    ParentsPassTitle,
    MotherCanPass,
    FatherCanPass,
    EachCellShows,
    RhSquareTitle,
    RhSquareDesc,
    GreenBoxesPositive,

    CompatibilityChecker,
    PossibleBabyTypes,
    ReceiveFrom,
    DonateTo,
    Or,
    RelativeDonationTitle,
    RelativeDonationBody,

    GeneticRisks,
    RiskRhTitle,
    RiskRhDesc,
    RiskAboTitle,
    RiskAboDesc,
    RiskKellTitle,
    RiskKellDesc,
    RiskDuffyTitle,
    RiskDuffyDesc,
}

impl Lang {
    fn pick(self, en: &'static str, bn: &'static str) -> &'static str {
        match self {
            Lang::En => en,
            Lang::Bn => bn,
        }
    }

    /// Look up a translated string
    pub fn text(self, key: Text) -> &'static str {
        match key {
            Text::Title => self.pick(
                "Advanced Blood Group Calculator",
                "এডভান্স রক্তের গ্রুপ ক্যালকুলেটর",
            ),
            Text::FatherBloodGroup => self.pick("Father's blood group", "পিতার রক্তের গ্রুপ"),
            Text::MotherBloodGroup => self.pick("Mother's blood group", "মাতার রক্তের গ্রুপ"),
            Text::RhWarningTitle => self.pick("Rh-incompatibility risk:", "আরএইচ অসঙ্গতি ঝুঁকি:"),
            Text::RhWarningBody => self.pick(
                "Mother is Rh-negative, possible Rh-positive baby. Consult your physician about RhoGAM.",
                "মাতা Rh-নেগেটিভ, শিশুর Rh-পজিটিভ হওয়ার সম্ভাবনা আছে। RhoGAM সম্পর্কে চিকিৎসকের পরামর্শ নিন।",
            ),
            Text::ShowAdvanced => self.pick(
                "Show advanced systems (Kell, Duffy, MN)",
                "এডভান্স সিস্টেমগুলি দেখুন (Kell, Duffy, MN)",
            ),

            Text::OtherSystems => self.pick(
                "Other blood-group systems",
                "অন্যান্য রক্তের গ্রুপ সিস্টেম",
            ),
            Text::KellTitle => self.pick("Kell (K/k)", "কেল (K/k)"),
            Text::MnTitle => self.pick("MN", "এমএন"),
            Text::DuffyTitle => self.pick("Duffy (Fy)", "ডাফি (Fy)"),
            Text::SelectorFather => self.pick("Father", "পিতা"),
            Text::SelectorMother => self.pick("Mother", "মাতা"),

            Text::OutcomeProbabilities => self.pick("Outcome probabilities", "সম্ভাব্য ফলাফল"),

            Text::AboSquareTitle => self.pick("ABO Punnett square", "ABO পানেট স্কয়ার"),
            Text::AboSquareDesc => self.pick(
                "Rows = mother's alleles, columns = father's alleles.",
                "সারি = মায়ের অ্যালিল • কলাম = পিতার অ্যালিল।",
            ),
            Text::ParentsPassTitle => self.pick(
                "What the parents can pass on",
                "পিতামাতা কী দিতে পারেন",
            ),
            Text::MotherCanPass => self.pick("Mother can pass", "মাতা দিতে পারেন"),
            Text::FatherCanPass => self.pick("Father can pass", "পিতা দিতে পারেন"),
            Text::EachCellShows => self.pick(
                "Each cell shows the baby's ABO blood type for that allele pairing.",
                "প্রতিটি রঙিন ঘর সেই অ্যালিল জুটির জন্য শিশুর ABO টাইপ দেখায়।",
            ),
            Text::RhSquareTitle => self.pick("Rh Punnett square", "Rh পানেট স্কয়ার"),
            Text::RhSquareDesc => self.pick(
                "\"+\" dominates \"-\"; any cell with at least one \"+\" allele is Rh positive.",
                "\"+\" \"-\" এর উপর প্রভাবশালী; কমপক্ষে একটি \"+\" অ্যালিল থাকলে ঘর Rh পজিটিভ হবে।",
            ),
            Text::GreenBoxesPositive => self.pick(
                "Green cells are Rh positive; red cells are Rh negative.",
                "সবুজ ঘর Rh পজিটিভ, গোলাপি ঘর Rh নেগেটিভ।",
            ),

            Text::CompatibilityChecker => self.pick("Compatibility checker", "সামঞ্জস্য পরীক্ষা করুন"),
            Text::PossibleBabyTypes => self.pick("Possible baby types:", "সম্ভাব্য শিশুর টাইপসমূহ:"),
            Text::ReceiveFrom => self.pick("can receive from", "গ্রহণ করতে পারে"),
            Text::DonateTo => self.pick("and donate to", "এবং প্রদান করতে পারে"),
            Text::Or => self.pick("or", "অথবা"),
            Text::RelativeDonationTitle => self.pick(
                "Important for family donations",
                "আত্মীয়ের রক্তদানে সতর্কতা",
            ),
            Text::RelativeDonationBody => self.pick(
                "Whole-blood or red-cell units from parents, siblings, or children must be irradiated (or pathogen-reduced) to prevent TA-GVHD.",
                "পিতা-মাতা, ভাই-বোন বা সন্তানের দেওয়া সম্পূর্ণ রক্ত/রেড-সেল দেওয়ার আগে TA-GVHD এড়াতে অবশ্যই রক্তটি বিকিরিত (irradiated) বা রোগজীবাণু-হ্রাসকরণ করতে হবে।",
            ),

            Text::GeneticRisks => self.pick(
                "Possible genetic / immune concerns",
                "সম্ভাব্য জিনগত / ইমিউন উদ্বেগ",
            ),
            Text::RiskRhTitle => self.pick("Rh-incompatibility (HDN)", "Rh অসঙ্গতি (HDN)"),
            Text::RiskRhDesc => self.pick(
                "Mother is Rh-negative and there's a chance the baby will be Rh-positive. Prophylactic Rh-Ig (RhoGAM) is usually given.",
                "মাতা Rh-নেগেটিভ এবং শিশুর Rh-পজিটিভ হওয়ার সম্ভাবনা আছে। সাধারণত Rh-Ig (RhoGAM) দেওয়া হয়।",
            ),
            Text::RiskAboTitle => self.pick("ABO haemolytic disease", "ABO হেমোলাইটিক রোগ"),
            Text::RiskAboDesc => self.pick(
                "Mother is type O and baby could be A or B. Usually mild but worth monitoring.",
                "মাতা O টাইপ এবং শিশু A বা B হতে পারে। সাধারণত হালকা, তবে নজরদারি প্রয়োজন।",
            ),
            Text::RiskKellTitle => self.pick("Kell incompatibility (HDN)", "কেল অসঙ্গতি (HDN)"),
            Text::RiskKellDesc => self.pick(
                "Mother lacks Kell antigen (K-) while baby may be K+. Anti-K antibodies can cause severe HDN; close obstetric monitoring recommended.",
                "মাতার Kell অ্যান্টিজেন নেই (K-) কিন্তু শিশুর K+ হতে পারে; গুরুতর HDN হতে পারে, নিবিড় পর্যবেক্ষণ জরুরি।",
            ),
            Text::RiskDuffyTitle => self.pick("Duffy Fy(a-b-) protection", "ডাফি Fy(a-b-) সুরক্ষা"),
            Text::RiskDuffyDesc => self.pick(
                "If the baby is Fy(a-b-) they will be resistant to Plasmodium vivax malaria. Not a disease risk, rather a protective trait.",
                "যদি শিশু Fy(a-b-) হয় তবে Plasmodium vivax ম্যালেরিয়া থেকে সুরক্ষিত থাকবে। এটি রোগ নয় বরং সুরক্ষামূলক বৈশিষ্ট্য।",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_languages_have_every_string() {
        let keys = [
            Text::Title,
            Text::RhWarningTitle,
            Text::RhWarningBody,
            Text::GeneticRisks,
            Text::RiskKellDesc,
            Text::RelativeDonationBody,
        ];
        for key in keys {
            assert!(!Lang::En.text(key).is_empty());
            assert!(!Lang::Bn.text(key).is_empty());
        }
    }

    #[test]
    fn language_only_changes_labels() {
        assert_ne!(Lang::En.text(Text::Title), Lang::Bn.text(Text::Title));
    }
}
