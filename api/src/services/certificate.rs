//! Certificate rendering.
//!
//! Eligibility is decided in `db::certificates`; this module turns an eligible
//! descriptor into a downloadable document. Certificate ids are presentational
//! only: they are neither stored nor checked for collisions.

use askama::Template;
use chrono::{DateTime, Utc};
use db::certificates::CertificateDescriptor;
use rand::Rng;

const BASE36_DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Everything printed on a certificate.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub student_name: String,
    pub course_title: String,
    pub instructor_name: String,
    pub completion_date: DateTime<Utc>,
    pub certificate_id: String,
    pub organization_name: String,
    /// Printed as "verify at"; nothing serves it.
    pub verify_url: String,
}

impl IssuedCertificate {
    pub fn from_descriptor(
        descriptor: &CertificateDescriptor,
        certificate_id: String,
        organization_name: String,
        verify_url: String,
    ) -> Self {
        Self {
            student_name: descriptor.student_name.clone(),
            course_title: descriptor.course_title.clone(),
            instructor_name: descriptor.instructor_name.clone(),
            completion_date: descriptor.completion_date,
            certificate_id,
            organization_name,
            verify_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedCertificate {
    pub content_type: &'static str,
    pub file_name: String,
    pub body: Vec<u8>,
}

pub trait CertificateRenderer: Send + Sync {
    fn render(
        &self,
        certificate: &IssuedCertificate,
    ) -> Result<RenderedCertificate, askama::Error>;
}

#[derive(Template)]
#[template(path = "certificate.html")]
struct CertificatePage<'a> {
    org: &'a str,
    student: &'a str,
    course: &'a str,
    instructor: &'a str,
    date: String,
    id: &'a str,
    verify: &'a str,
}

/// Renders a standalone, printable HTML page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCertificateRenderer;

impl CertificateRenderer for HtmlCertificateRenderer {
    fn render(&self, c: &IssuedCertificate) -> Result<RenderedCertificate, askama::Error> {
        let page = CertificatePage {
            org: &c.organization_name,
            student: &c.student_name,
            course: &c.course_title,
            instructor: &c.instructor_name,
            date: c.completion_date.format("%B %-d, %Y").to_string(),
            id: &c.certificate_id,
            verify: &c.verify_url,
        };

        Ok(RenderedCertificate {
            content_type: "text/html; charset=utf-8",
            file_name: format!("{}.html", c.certificate_id),
            body: page.render()?.into_bytes(),
        })
    }
}

/// `CERT-<unix millis in base 36>-<6 random uppercase alphanumerics>`.
pub fn generate_certificate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();

    format!("CERT-{}-{}", to_base36(now.timestamp_millis().max(0) as u64), suffix)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}
