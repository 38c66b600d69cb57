//! Bundled Arizona mortgage broker question bank and study outlines.
//!
//! Each category has a few hand-written questions followed by numbered drill
//! questions, for `QUESTIONS_PER_CATEGORY` per category.

use prep_core::model::{
    CHOICE_COUNT, Category, GuideOutline, KeyPoint, QuestionCatalog, QuestionId, QuestionRecord,
};

pub const QUESTIONS_PER_CATEGORY: u32 = 100;

struct Seed {
    prompt: &'static str,
    choices: [&'static str; CHOICE_COUNT],
    correct: usize,
    explanation: &'static str,
}

/// Shape of the numbered drill questions for a category.
struct Drill {
    code: &'static str,
    stem: &'static str,
    choices: [&'static str; CHOICE_COUNT],
    correct: usize,
    explanation: &'static str,
}

fn seeds(category: Category) -> (&'static [Seed], Drill) {
    match category {
        Category::MortgageLendingBasics => (
            &[
                Seed {
                    prompt: "What is the role of a promissory note in a mortgage loan?",
                    choices: [
                        "It pledges the property as collateral",
                        "It is the borrower's written promise to repay the debt",
                        "It proves the borrower carries hazard insurance",
                        "It itemizes the borrower's closing costs",
                    ],
                    correct: 1,
                    explanation: "The note is the borrower's promise to repay; the mortgage or deed of trust secures it.",
                },
                Seed {
                    prompt: "Amortization describes:",
                    choices: [
                        "Pricing a loan purely on credit score",
                        "Payments that never reduce principal",
                        "Retiring a debt through scheduled periodic payments",
                        "A lender-initiated foreclosure",
                    ],
                    correct: 2,
                    explanation: "An amortizing loan is paid off over time by installments covering principal and interest.",
                },
                Seed {
                    prompt: "What happens in the secondary mortgage market?",
                    choices: [
                        "Borrowers negotiate terms directly with underwriters",
                        "Only subprime loans are traded",
                        "Existing loans are sold to investors, giving lenders liquidity",
                        "A state fund insures conventional loans",
                    ],
                    correct: 2,
                    explanation: "Selling closed loans to investors such as Fannie Mae frees lender capital for new originations.",
                },
            ],
            Drill {
                code: "MLB",
                stem: "Which statement about mortgage lending basics is most accurate?",
                choices: [
                    "Borrowers pay no interest on a fully amortized loan",
                    "Arizona brokers may never charge fees",
                    "New loans are originated in the primary mortgage market",
                    "Conventional loans skip underwriting",
                ],
                correct: 2,
                explanation: "Loans are originated in the primary market and may later be sold in the secondary market.",
            },
        ),
        Category::FederalRegulations => (
            &[
                Seed {
                    prompt: "Which law prohibits kickbacks for settlement service referrals?",
                    choices: ["TILA", "RESPA", "ECOA", "GLBA"],
                    correct: 1,
                    explanation: "RESPA (Regulation X) Section 8 bans kickbacks and unearned fees.",
                },
                Seed {
                    prompt: "Regulation Z implements which statute?",
                    choices: [
                        "Truth in Lending Act",
                        "Fair Credit Reporting Act",
                        "Home Mortgage Disclosure Act",
                        "Bank Secrecy Act",
                    ],
                    correct: 0,
                    explanation: "TILA is implemented by Regulation Z and requires APR and finance charge disclosure.",
                },
                Seed {
                    prompt: "ECOA forbids credit discrimination based on:",
                    choices: [
                        "Debt-to-income ratio",
                        "Credit score",
                        "Marital status",
                        "Loan-to-value ratio",
                    ],
                    correct: 2,
                    explanation: "ECOA (Regulation B) protects applicants from discrimination on protected bases including marital status.",
                },
            ],
            Drill {
                code: "FR",
                stem: "Which statement about federal mortgage regulation is most accurate?",
                choices: [
                    "RESPA permits referral kickbacks",
                    "TILA requires disclosure of the APR",
                    "GLBA sets maximum interest rates",
                    "HOEPA applies only to commercial loans",
                ],
                correct: 1,
                explanation: "TILA requires creditors to disclose the annual percentage rate and finance charges.",
            },
        ),
        Category::StateRegulations => (
            &[
                Seed {
                    prompt: "Which agency licenses Arizona mortgage brokers?",
                    choices: [
                        "Arizona Corporation Commission",
                        "Arizona Department of Insurance and Financial Institutions",
                        "Arizona Department of Real Estate",
                        "Arizona Attorney General",
                    ],
                    correct: 1,
                    explanation: "DIFI licenses and supervises mortgage brokers in Arizona.",
                },
                Seed {
                    prompt: "Why must an Arizona mortgage broker maintain a surety bond?",
                    choices: [
                        "To guarantee loan approval",
                        "To cover the broker's personal debts",
                        "To protect consumers from broker misconduct",
                        "To fund the state's recovery of closing costs",
                    ],
                    correct: 2,
                    explanation: "The bond gives consumers a source of recovery if the licensee violates the law.",
                },
                Seed {
                    prompt: "How often must an Arizona mortgage broker license be renewed?",
                    choices: ["Monthly", "Annually", "Every five years", "Never"],
                    correct: 1,
                    explanation: "Arizona mortgage broker licenses renew annually.",
                },
            ],
            Drill {
                code: "SR",
                stem: "Which statement about Arizona mortgage broker regulation is most accurate?",
                choices: [
                    "Unlicensed brokering is permitted for small loans",
                    "Licenses never expire",
                    "DIFI may discipline licensees who violate state law",
                    "Surety bonds are optional",
                ],
                correct: 2,
                explanation: "DIFI has enforcement authority including suspension and revocation.",
            },
        ),
        Category::LoanOrigination => (
            &[
                Seed {
                    prompt: "When must a Loan Estimate be delivered?",
                    choices: [
                        "At closing",
                        "Within three business days of application",
                        "Thirty days after approval",
                        "Only on request",
                    ],
                    correct: 1,
                    explanation: "TRID requires the Loan Estimate within three business days of receiving an application.",
                },
                Seed {
                    prompt: "The Closing Disclosure must be received how long before consummation?",
                    choices: [
                        "One hour",
                        "Three business days",
                        "Ten calendar days",
                        "No waiting period applies",
                    ],
                    correct: 1,
                    explanation: "Borrowers must receive the Closing Disclosure at least three business days before closing.",
                },
                Seed {
                    prompt: "Which law set national licensing standards for loan originators?",
                    choices: ["SAFE Act", "HMDA", "CRA", "FCRA"],
                    correct: 0,
                    explanation: "The SAFE Act established NMLS registration and licensing standards.",
                },
            ],
            Drill {
                code: "LO",
                stem: "Which statement about loan origination is most accurate?",
                choices: [
                    "Underwriting ignores the borrower's income",
                    "Appraisals are never required",
                    "Underwriting evaluates credit, capacity, and collateral",
                    "Loan originators need no license",
                ],
                correct: 2,
                explanation: "Underwriters weigh credit, income and assets, and the property securing the loan.",
            },
        ),
        Category::Ethics => (
            &[
                Seed {
                    prompt: "Steering a borrower to a costlier loan for higher compensation is:",
                    choices: [
                        "Acceptable if disclosed afterwards",
                        "An unethical and prohibited practice",
                        "Required by investor guidelines",
                        "Permitted for refinance loans",
                    ],
                    correct: 1,
                    explanation: "Steering for compensation harms consumers and is prohibited.",
                },
                Seed {
                    prompt: "Advertising a rate without its required terms is:",
                    choices: [
                        "Misleading advertising",
                        "Standard marketing",
                        "Required by RESPA",
                        "Allowed for adjustable-rate loans",
                    ],
                    correct: 0,
                    explanation: "Advertising must not deceive; triggering terms require additional disclosures.",
                },
                Seed {
                    prompt: "A loan originator who notices inflated income on an application should:",
                    choices: [
                        "Ignore it if the loan closes",
                        "Adjust the figures to fit guidelines",
                        "Refuse to submit false information and report it as required",
                        "Ask the borrower to sign a waiver",
                    ],
                    correct: 2,
                    explanation: "Knowingly submitting false information is mortgage fraud.",
                },
            ],
            Drill {
                code: "ETH",
                stem: "Which statement about professional ethics in mortgage lending is most accurate?",
                choices: [
                    "Exaggerating borrower income is acceptable",
                    "Deceptive advertising is harmless",
                    "Honest documentation and fair dealing protect consumers",
                    "Undisclosed fees are standard practice",
                ],
                correct: 2,
                explanation: "Ethical lending relies on truthful disclosure and fair dealing.",
            },
        ),
        Category::MortgageProducts => (
            &[
                Seed {
                    prompt: "FHA loans are insured by:",
                    choices: [
                        "The Department of Veterans Affairs",
                        "The Federal Housing Administration",
                        "Fannie Mae",
                        "The USDA",
                    ],
                    correct: 1,
                    explanation: "FHA mortgage insurance is provided by the Federal Housing Administration within HUD.",
                },
                Seed {
                    prompt: "A balloon mortgage requires:",
                    choices: [
                        "No payments for the first year",
                        "A large lump-sum payment at the end of the term",
                        "A variable rate tied to an index",
                        "Full amortization over 40 years",
                    ],
                    correct: 1,
                    explanation: "Balloon loans leave a large final payment due at maturity.",
                },
                Seed {
                    prompt: "USDA loans target:",
                    choices: [
                        "Luxury urban condominiums",
                        "Investment properties",
                        "Moderate-income buyers in eligible rural areas",
                        "Commercial real estate",
                    ],
                    correct: 2,
                    explanation: "USDA programs help moderate-income borrowers in designated rural areas.",
                },
            ],
            Drill {
                code: "MP",
                stem: "Which statement about mortgage products is most accurate?",
                choices: [
                    "VA loans require 25% down",
                    "Balloon loans have no final lump sum",
                    "ARM rates adjust by an index plus a margin",
                    "FHA loans are only for investment property",
                ],
                correct: 2,
                explanation: "An adjustable-rate mortgage resets periodically to its index plus a fixed margin.",
            },
        ),
    }
}

fn question_id(category: Category, number: u32) -> QuestionId {
    let base = Category::ALL
        .iter()
        .position(|c| *c == category)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(0);
    QuestionId::new(base * 1_000 + number)
}

fn category_questions(category: Category) -> Result<Vec<QuestionRecord>, prep_core::Error> {
    let (seeds, drill) = seeds(category);
    let mut records = Vec::with_capacity(QUESTIONS_PER_CATEGORY as usize);
    let mut number = 0;

    for seed in seeds {
        number += 1;
        records.push(QuestionRecord::new(
            question_id(category, number),
            category,
            seed.prompt,
            seed.choices,
            seed.correct,
            seed.explanation,
        )?);
    }

    while number < QUESTIONS_PER_CATEGORY {
        number += 1;
        let tag = format!("{} Q{number}", drill.code);
        records.push(QuestionRecord::new(
            question_id(category, number),
            category,
            format!("{tag}: {}", drill.stem),
            drill.choices.map(|choice| format!("{choice} ({tag})")),
            drill.correct,
            format!("{} ({tag})", drill.explanation),
        )?);
    }

    Ok(records)
}

/// Build the full bundled catalog.
///
/// # Errors
///
/// Returns `prep_core::Error` if a bundled record fails validation.
pub fn build_catalog() -> Result<QuestionCatalog, prep_core::Error> {
    let mut records = Vec::new();
    for category in Category::ALL {
        records.extend(category_questions(category)?);
    }
    Ok(QuestionCatalog::new(records)?)
}

fn outline(
    category: Category,
    title: &str,
    summary: &str,
    points: &[(&str, &str)],
) -> GuideOutline {
    GuideOutline {
        category,
        title: title.to_string(),
        summary: summary.to_string(),
        key_points: points
            .iter()
            .map(|(term, detail)| KeyPoint::new(*term, *detail))
            .collect(),
    }
}

/// Overview text shown ahead of each category's questions in the study guide.
#[must_use]
pub fn outlines() -> Vec<GuideOutline> {
    vec![
        outline(
            Category::MortgageLendingBasics,
            "Mortgage Lending Basics",
            "Core concepts: primary and secondary markets, promissory notes, amortization.",
            &[
                ("Key Documents", "Promissory note, mortgage or deed of trust"),
                ("Underwriting Basics", "Credit, capacity, collateral"),
                ("LTV & DTI Ratios", "The calculations behind approval"),
            ],
        ),
        outline(
            Category::FederalRegulations,
            "Key Federal Regulations",
            "Federal law governs how mortgages are advertised, disclosed, and settled.",
            &[
                ("RESPA (Reg X)", "Settlement cost disclosures and anti-kickback rules"),
                ("TILA (Reg Z)", "APR and finance charge disclosure"),
                ("ECOA (Reg B)", "No discrimination in credit decisions"),
                ("HOEPA", "Protection from high-cost loans"),
                ("GLBA", "Financial privacy"),
            ],
        ),
        outline(
            Category::StateRegulations,
            "Arizona State Regulations",
            "Arizona licensing and supervision through the Department of Insurance and Financial Institutions (DIFI).",
            &[
                ("Licensing", "Pre-licensing education and exam"),
                ("License Renewal", "Annual renewal"),
                ("Surety Bonds", "Consumer protection against misconduct"),
                ("Disciplinary Actions", "DIFI enforcement powers"),
            ],
        ),
        outline(
            Category::LoanOrigination,
            "Loan Origination & Underwriting",
            "Taking applications, gathering documentation, and underwriting the loan.",
            &[
                ("Loan Estimate (LE)", "Initial cost estimate"),
                ("Closing Disclosure (CD)", "Final terms and settlement costs"),
                ("NMLS Requirements", "SAFE Act licensing standards"),
                ("Underwriting", "Credit, income, assets, and property"),
            ],
        ),
        outline(
            Category::Ethics,
            "Ethics & Professional Responsibilities",
            "Ethical lending protects consumers and the integrity of the industry.",
            &[
                ("Truthful Advertising", "No deceptive rates or terms"),
                ("Fair Dealing", "No steering or predatory tactics"),
                ("Fraud Prevention", "Honest documentation and disclosures"),
                ("SAFE Act", "Uniform licensing and oversight"),
            ],
        ),
        outline(
            Category::MortgageProducts,
            "Common Mortgage Products",
            "An overview of common loan programs.",
            &[
                ("Conventional Loans", "Conforming or jumbo"),
                ("FHA Loans", "Insured by the Federal Housing Administration"),
                ("VA Loans", "Guaranteed by the Department of Veterans Affairs"),
                ("USDA Loans", "Rural and moderate-income buyers"),
                ("ARMs", "Rate adjusts by index plus margin"),
                ("Balloon Mortgages", "Large final payment at term end"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::CategoryFilter;

    #[test]
    fn bank_has_one_hundred_questions_per_category() {
        let catalog = build_catalog().unwrap();
        assert_eq!(catalog.len(), 600);
        for category in Category::ALL {
            assert_eq!(catalog.count(CategoryFilter::Only(category)), 100);
        }
    }

    #[test]
    fn every_category_has_an_outline() {
        let outlines = outlines();
        for category in Category::ALL {
            assert!(outlines.iter().any(|o| o.category == category));
        }
    }
}
