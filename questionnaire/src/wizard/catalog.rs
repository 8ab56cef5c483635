// Survey catalog
// The fixed question list; the answer schema is derived from it.

use super::answer_store::AnswerStore;
use super::question::{Auxiliary, Condition, Input, OptionSource, Question, WeightRow};
use crate::models::answers::Section;

pub const MAX_OBJECTIVE_WEIGHT: u8 = 10;
pub const TOP_ISSUES: usize = 3;

const EMPLOYEE_COUNTS: &[(&str, &str)] = &[
    ("1-10", "1 à 10"),
    ("11-50", "11 à 50"),
    ("51-200", "51 à 200"),
    ("201-500", "201 à 500"),
    ("500+", "Plus de 500"),
];

const ROLES: &[(&str, &str)] = &[
    ("direction", "Direction"),
    ("manager", "Manager"),
    ("project_lead", "Chef de projet"),
    ("developer", "Développeur"),
    ("other", "Autre"),
];

const TEAM_LEADERSHIP: &[(&str, &str)] = &[
    ("none", "Aucune équipe"),
    ("single", "Une équipe"),
    ("multiple", "Plusieurs équipes"),
];

const PRACTICES: &[(&str, &str)] = &[
    ("Agile", "Agile"),
    ("Scrum", "Scrum"),
    ("Kanban", "Kanban"),
    ("Lean", "Lean"),
    ("Cycle en V", "Cycle en V"),
    ("Aucune", "Aucune méthode formalisée"),
];

const CHALLENGES: &[(&str, &str)] = &[
    ("Retard projets", "Retard projets"),
    ("Turnover élevé", "Turnover élevé"),
    ("Communication", "Communication"),
    ("Budget", "Budget"),
    ("Qualité", "Qualité"),
    ("Recrutement", "Recrutement"),
];

const DECISION_PROCESS: &[(&str, &str)] = &[
    ("centralized", "Centralisé"),
    ("decentralized", "Décentralisé"),
    ("mixed", "Mixte"),
];

const REMOTE_WORK: &[(&str, &str)] = &[
    ("on_site", "Sur site"),
    ("hybrid", "Hybride"),
    ("full_remote", "Full remote"),
];

const SKILLS: &[(&str, &str)] = &[
    ("Rust", "Rust"),
    ("Cloud", "Cloud"),
    ("Data", "Data"),
    ("IA", "Intelligence artificielle"),
    ("Sécurité", "Sécurité"),
    ("DevOps", "DevOps"),
    ("Gestion de projet", "Gestion de projet"),
];

const TOOLS: &[(&str, &str)] = &[
    ("Jira", "Jira"),
    ("GitLab", "GitLab"),
    ("GitHub", "GitHub"),
    ("Notion", "Notion"),
    ("Slack", "Slack"),
    ("Teams", "Teams"),
];

const TRAINING_BUDGET: &[(&str, &str)] = &[
    ("none", "Aucun"),
    ("lt_5k", "Moins de 5 000 €"),
    ("5k_20k", "5 000 € à 20 000 €"),
    ("gt_20k", "Plus de 20 000 €"),
];

const OBJECTIVES: &[WeightRow] = &[
    WeightRow {
        field: "objectiveCost",
        label: "Réduction des coûts",
    },
    WeightRow {
        field: "objectiveQuality",
        label: "Qualité",
    },
    WeightRow {
        field: "objectiveSpeed",
        label: "Rapidité de livraison",
    },
    WeightRow {
        field: "objectiveInnovation",
        label: "Innovation",
    },
];

const fn text(
    section: Section,
    id: &'static str,
    prompt: &'static str,
    placeholder: &'static str,
) -> Question {
    Question {
        id,
        section,
        prompt,
        input: Input::Text {
            field: id,
            placeholder,
        },
        auxiliary: None,
    }
}

const fn choice(
    section: Section,
    id: &'static str,
    prompt: &'static str,
    options: OptionSource,
) -> Question {
    Question {
        id,
        section,
        prompt,
        input: Input::Choice { field: id, options },
        auxiliary: None,
    }
}

const fn multi(
    section: Section,
    id: &'static str,
    prompt: &'static str,
    options: OptionSource,
) -> Question {
    Question {
        id,
        section,
        prompt,
        input: Input::MultiSelect { field: id, options },
        auxiliary: None,
    }
}

pub const QUESTIONS: [Question; 20] = [
    // profile
    text(
        Section::Profile,
        "companyName",
        "Quel est le nom de votre entreprise ?",
        "Entrez le nom de votre entreprise",
    ),
    text(
        Section::Profile,
        "industry",
        "Dans quel secteur d'activité opérez-vous ?",
        "Ex: Technologies, Santé, Commerce...",
    ),
    choice(
        Section::Profile,
        "employeeCount",
        "Combien de collaborateurs compte votre entreprise ?",
        OptionSource::Fixed(EMPLOYEE_COUNTS),
    ),
    text(
        Section::Profile,
        "yearFounded",
        "En quelle année votre entreprise a-t-elle été fondée ?",
        "Ex: 2015",
    ),
    choice(
        Section::Profile,
        "role",
        "Quel est votre rôle ?",
        OptionSource::Fixed(ROLES),
    ),
    Question {
        id: "teamLeadership",
        section: Section::Profile,
        prompt: "Encadrez-vous une ou plusieurs équipes ?",
        input: Input::Choice {
            field: "teamLeadership",
            options: OptionSource::Fixed(TEAM_LEADERSHIP),
        },
        auxiliary: Some(Auxiliary {
            field: "teamCount",
            prompt: "Combien d'équipes encadrez-vous ?",
            placeholder: "Ex: 3",
            when: Condition {
                section: Section::Profile,
                field: "teamLeadership",
                equals: "multiple",
            },
        }),
    },
    // organization
    multi(
        Section::Organization,
        "managementPractices",
        "Quelles pratiques de gestion utilisez-vous ?",
        OptionSource::Fixed(PRACTICES),
    ),
    multi(
        Section::Organization,
        "challenges",
        "Quelles difficultés rencontrez-vous ?",
        OptionSource::Fixed(CHALLENGES),
    ),
    Question {
        id: "topThreeIssues",
        section: Section::Organization,
        prompt: "Classez vos trois difficultés principales.",
        input: Input::Ranked {
            field: "topThreeIssues",
            max_rank: TOP_ISSUES,
            options: OptionSource::DerivedFrom {
                section: Section::Organization,
                field: "challenges",
            },
        },
        auxiliary: None,
    },
    choice(
        Section::Organization,
        "decisionProcess",
        "Comment les décisions sont-elles prises ?",
        OptionSource::Fixed(DECISION_PROCESS),
    ),
    choice(
        Section::Organization,
        "remoteWork",
        "Quelle est votre organisation du travail ?",
        OptionSource::Fixed(REMOTE_WORK),
    ),
    // technical
    multi(
        Section::Technical,
        "currentSkills",
        "Quelles compétences maîtrisez-vous déjà ?",
        OptionSource::Fixed(SKILLS),
    ),
    multi(
        Section::Technical,
        "desiredSkills",
        "Quelles compétences souhaitez-vous développer ?",
        OptionSource::Fixed(SKILLS),
    ),
    choice(
        Section::Technical,
        "mostImportantSkill",
        "Quelle compétence est la plus importante pour vous ?",
        OptionSource::DerivedFrom {
            section: Section::Technical,
            field: "desiredSkills",
        },
    ),
    multi(
        Section::Technical,
        "tools",
        "Quels outils utilisez-vous au quotidien ?",
        OptionSource::Fixed(TOOLS),
    ),
    Question {
        id: "objectives",
        section: Section::Technical,
        prompt: "Quelle importance accordez-vous à chacun de ces objectifs ?",
        input: Input::Weights {
            rows: OBJECTIVES,
            max: MAX_OBJECTIVE_WEIGHT,
        },
        auxiliary: None,
    },
    choice(
        Section::Technical,
        "trainingBudget",
        "Quel budget annuel consacrez-vous à la formation ?",
        OptionSource::Fixed(TRAINING_BUDGET),
    ),
    // suggestions
    text(
        Section::Suggestions,
        "improvements",
        "Quelles améliorations souhaiteriez-vous voir ?",
        "Vos idées d'amélioration",
    ),
    text(
        Section::Suggestions,
        "expectations",
        "Qu'attendez-vous de cet accompagnement ?",
        "Vos attentes",
    ),
    text(
        Section::Suggestions,
        "additionalComments",
        "Avez-vous d'autres commentaires ?",
        "Commentaires libres",
    ),
];

pub fn questions() -> Vec<Question> {
    QUESTIONS.to_vec()
}

/// A store declaring every field of the catalog, all at defaults.
pub fn answer_store() -> AnswerStore {
    AnswerStore::from_questions(&QUESTIONS)
}
