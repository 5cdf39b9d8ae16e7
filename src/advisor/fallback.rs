//! Fallback Advice Module
//!
//! Canned career guidance used whenever the LLM is unavailable or returns
//! something unusable. Selection is a plain keyword containment check on the
//! lower-cased user text, so the same message always gets the same answer.

use super::types::CareerResponse;

/// Careers that have hand-written advice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCareer {
    SoftwareEngineer,
    DataScientist,
    Teacher,
    /// Any career without a dedicated entry
    General,
}

/// Keyword groups, checked in order; first match wins
const KEYWORD_TABLE: &[(FallbackCareer, &[&str])] = &[
    (
        FallbackCareer::SoftwareEngineer,
        &["software", "programmer", "developer", "engineer"],
    ),
    (
        FallbackCareer::DataScientist,
        &["data scientist", "data analytics", "machine learning"],
    ),
    (FallbackCareer::Teacher, &["teacher", "educator", "teaching"]),
];

impl FallbackCareer {
    /// Pick the canned career for a user message
    pub fn classify(user_message: &str) -> Self {
        let message = user_message.to_lowercase();
        KEYWORD_TABLE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
            .map(|(career, _)| *career)
            .unwrap_or(FallbackCareer::General)
    }

    pub fn response(self) -> CareerResponse {
        match self {
            FallbackCareer::SoftwareEngineer => software_engineer(),
            FallbackCareer::DataScientist => data_scientist(),
            FallbackCareer::Teacher => teacher(),
            FallbackCareer::General => general(),
        }
    }
}

/// Canned advice for a user message
pub fn fallback_advice(user_message: &str) -> CareerResponse {
    FallbackCareer::classify(user_message).response()
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn advice(overview: &str, degrees: &[&str], skills: &[&str], path: &[&str]) -> CareerResponse {
    CareerResponse {
        career_overview: overview.to_string(),
        recommended_degree: owned(degrees),
        skills_needed: owned(skills),
        learning_path: owned(path),
    }
}

// ============================================================
// CANNED ADVICE
// ============================================================

fn software_engineer() -> CareerResponse {
    advice(
        "Design, develop, and maintain software applications that solve real-world problems and drive technological innovation.",
        &[
            "Bachelor's in Computer Science (4 years) - covers algorithms, data structures, software engineering",
            "Coding Bootcamp (3-6 months) - intensive, practical training with job placement assistance",
            "Bachelor's in Software Engineering (4 years) - specialized focus on software development lifecycle",
            "Self-taught path with portfolio - requires 1-2 years of dedicated learning and project building",
        ],
        &[
            "Programming languages (Python, JavaScript, Java) - essential for building applications",
            "Problem-solving and logical thinking - core to debugging and algorithm design",
            "Version control (Git) - critical for collaborative development",
            "Database management (SQL) - needed for data storage and retrieval",
            "Testing and debugging - ensures code quality and reliability",
        ],
        &[
            "Master programming fundamentals (6-12 months) - choose Python or JavaScript as starting language",
            "Build 3-5 portfolio projects (3-6 months) - include web apps, APIs, and databases",
            "Learn Git/GitHub and collaboration tools (1-2 months) - essential for team work",
            "Practice coding interviews and algorithms (2-3 months) - prepare for technical interviews",
            "Apply for entry-level positions or internships - target junior developer roles",
        ],
    )
}

fn data_scientist() -> CareerResponse {
    advice(
        "Extract actionable insights from complex datasets to drive strategic business decisions and solve real-world problems.",
        &[
            "Bachelor's in Statistics/Mathematics/Computer Science (4 years) - strong quantitative foundation required",
            "Data Science Bootcamp (3-9 months) - practical, hands-on training with real datasets",
            "Google Data Analytics Certificate (3-6 months) - entry-level credential for analytics roles",
            "Master's in Data Science (1-2 years) - advanced degree for senior positions and research roles",
        ],
        &[
            "Python/R programming - essential for data manipulation and statistical analysis",
            "Statistics and mathematics - foundation for understanding data patterns and model validity",
            "SQL and database management - critical for data extraction and warehousing",
            "Data visualization (Tableau, Power BI) - communicating insights to stakeholders",
            "Machine learning fundamentals - building predictive models and algorithms",
        ],
        &[
            "Master Python basics and pandas library (2-3 months) - focus on data manipulation",
            "Study statistics and probability theory (3-4 months) - understand hypothesis testing and distributions",
            "Learn SQL and database concepts (1-2 months) - practice with real datasets",
            "Develop data visualization skills (1-2 months) - create compelling charts and dashboards",
            "Build 2-3 end-to-end data science projects (3-6 months) - showcase complete analysis workflow",
        ],
    )
}

fn teacher() -> CareerResponse {
    advice(
        "Shape future generations by delivering engaging education and fostering critical thinking skills across diverse learning environments.",
        &[
            "Bachelor's in Education (4 years) - includes pedagogy, child development, and student teaching",
            "Alternative Certification Program (1-2 years) - for career changers with bachelor's degree",
            "Master's in Education (1-2 years) - advanced teaching methods and leadership preparation",
            "Subject-specific Bachelor's + Teaching Credential (4-5 years) - deep content knowledge plus teaching skills",
        ],
        &[
            "Communication and presentation - essential for delivering clear, engaging lessons",
            "Classroom management - maintaining productive learning environment and student behavior",
            "Patience and empathy - understanding diverse learning needs and emotional support",
            "Curriculum planning and assessment - designing effective lessons and measuring student progress",
            "Technology integration - using digital tools to enhance learning and engagement",
        ],
        &[
            "Complete education coursework and pedagogy training (2-4 years) - learn teaching methods and theory",
            "Gain student teaching experience (1 semester) - practice in real classroom under mentor guidance",
            "Obtain state teaching certification and pass required exams (3-6 months) - meet licensing requirements",
            "Develop subject matter expertise through continued education (ongoing) - stay current with content",
            "Apply for teaching positions and build professional network (3-6 months) - target specific grade levels or subjects",
        ],
    )
}

fn general() -> CareerResponse {
    advice(
        "This career field offers diverse opportunities for professional growth and meaningful contribution to society.",
        &[
            "Research specific degree requirements for your target role - check job postings and industry standards",
            "Consider 4-year university programs (Bachelor's) - provides comprehensive foundation and networking",
            "Explore community college options (Associate's, 2 years) - cost-effective pathway with practical skills",
            "Investigate professional certifications and bootcamps - faster, specialized training for specific skills",
        ],
        &[
            "Communication skills - essential for collaboration and presenting ideas effectively",
            "Problem-solving and critical thinking - core to analyzing challenges and developing solutions",
            "Adaptability and continuous learning - staying current with industry changes and new technologies",
            "Time management and organization - managing multiple projects and meeting deadlines",
            "Industry-specific technical skills - research the most in-demand skills for your chosen field",
        ],
        &[
            "Research the career field thoroughly (1-2 weeks) - understand roles, salary ranges, and growth prospects",
            "Identify specific education and skill requirements (1-2 weeks) - analyze job postings and talk to professionals",
            "Connect with industry professionals through networking (ongoing) - use LinkedIn, professional associations, informational interviews",
            "Gain relevant experience through internships, volunteering, or projects (3-12 months) - build practical skills and portfolio",
            "Apply strategically for positions that match your qualifications - tailor applications and prepare for interviews",
        ],
    )
}
