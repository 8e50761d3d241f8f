//! Student profile assembly and grade aggregates

use serde::Serialize;

use crate::store::{Grade, Student, Subject};

/// Sum of all grade values
pub fn sum_grades(grades: &[Grade]) -> f64 {
    grades.iter().map(|g| g.grade).sum()
}

/// Mean grade rounded half-up to two decimals; `0.0` for no grades
pub fn grade_point_average(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let average = sum_grades(grades) / grades.len() as f64;
    (average * 100.0).round() / 100.0
}

/// A student's grades across all subjects
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGrades {
    pub math_grade_results: Vec<Grade>,
    pub science_grade_results: Vec<Grade>,
    pub history_grade_results: Vec<Grade>,
    pub math_grade_average: f64,
    pub science_grade_average: f64,
    pub history_grade_average: f64,
}

impl StudentGrades {
    pub fn new(math: Vec<Grade>, science: Vec<Grade>, history: Vec<Grade>) -> Self {
        Self {
            math_grade_average: grade_point_average(&math),
            science_grade_average: grade_point_average(&science),
            history_grade_average: grade_point_average(&history),
            math_grade_results: math,
            science_grade_results: science,
            history_grade_results: history,
        }
    }

    pub fn results(&self, subject: Subject) -> &[Grade] {
        match subject {
            Subject::Math => &self.math_grade_results,
            Subject::Science => &self.science_grade_results,
            Subject::History => &self.history_grade_results,
        }
    }
}

/// Student fields plus the assembled grades
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub student_grades: StudentGrades,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades(values: &[f64]) -> Vec<Grade> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Grade {
                id: i as i64 + 1,
                student_id: 1,
                grade: *v,
            })
            .collect()
    }

    #[test]
    fn test_sum_grades() {
        assert_eq!(sum_grades(&grades(&[80.5, 90.0, 100.0])), 270.5);
        assert_eq!(sum_grades(&[]), 0.0);
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(grade_point_average(&grades(&[80.5, 90.0, 100.0])), 90.17);
        assert_eq!(grade_point_average(&grades(&[85.0, 86.25])), 85.63);
        assert_eq!(grade_point_average(&[]), 0.0);
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = StudentProfile {
            student: Student {
                id: 1,
                firstname: "Eric".to_string(),
                lastname: "Roby".to_string(),
                email_address: "eric.roby@luv2code_school.com".to_string(),
            },
            student_grades: StudentGrades::new(grades(&[100.0]), vec![], vec![]),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstname"], "Eric");
        assert_eq!(json["studentGrades"]["mathGradeResults"][0]["studentId"], 1);
        assert_eq!(json["studentGrades"]["mathGradeAverage"], 100.0);
        assert_eq!(
            json["studentGrades"]["scienceGradeResults"]
                .as_array()
                .map(Vec::len),
            Some(0)
        );
    }
}
