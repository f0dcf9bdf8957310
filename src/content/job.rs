//! Job history entries

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::collection::Item;
use crate::error::Result;
use crate::helpers::date::{deserialize_date, parse_date};
use crate::Site;

/// Kind of employment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// End of a position: a date, or the literal `present` for a current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEnd {
    Date(NaiveDate),
    Present,
}

impl JobEnd {
    pub fn is_present(&self) -> bool {
        matches!(self, JobEnd::Present)
    }
}

impl<'de> Deserialize<'de> for JobEnd {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EndVisitor;

        impl<'de> de::Visitor<'de> for EndVisitor {
            type Value = JobEnd;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date or the literal `present`")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "present" {
                    return Ok(JobEnd::Present);
                }
                parse_date(value)
                    .map(JobEnd::Date)
                    .ok_or_else(|| E::custom(format!("unrecognized end date `{}`", value)))
            }
        }

        deserializer.deserialize_str(EndVisitor)
    }
}

impl Serialize for JobEnd {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JobEnd::Date(date) => date.serialize(serializer),
            JobEnd::Present => serializer.serialize_str("present"),
        }
    }
}

/// Front-matter schema for a job entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub begin: NaiveDate,
    pub end: JobEnd,
    #[serde(rename = "type")]
    pub kind: EmploymentType,
    pub highlights: Vec<String>,
    pub skills: Vec<String>,
}

/// A loaded job entry
pub type Job = Item<JobMetadata>;

/// Most recent position first, slug tiebreak for determinism
pub fn by_begin_descending(a: &Job, b: &Job) -> Ordering {
    b.metadata
        .begin
        .cmp(&a.metadata.begin)
        .then_with(|| a.slug.cmp(&b.slug))
}

pub(crate) fn find_all(site: &Site) -> Result<Vec<Job>> {
    let mut jobs = site.jobs().find_all()?;
    jobs.sort_by(by_begin_descending);
    Ok(jobs)
}

pub(crate) fn find_by_slug(site: &Site, slug: &str) -> Result<Option<Job>> {
    site.jobs().find_by_slug(slug)
}
