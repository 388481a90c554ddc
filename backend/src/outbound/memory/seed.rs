//! Bilingual demo content for development mode.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::StoreError;
use crate::domain::{
    AnswerKey, ArticleId, BlogArticle, Course, CourseId, CourseLevel, CourseModule, EmailAddress,
    ForumCategory, ForumCategoryId, Lesson, LessonId, LocalizedText, Mcq, McqId, McqKind,
    ModuleId, Profile, Quote, Resource, ResourceId, Role, Statistic, Testimonial,
};

use super::accounts::register;
use super::tables::Tables;
use super::InMemoryStore;

/// Approved administrator created alongside the demo content.
#[derive(Debug, Clone)]
pub struct DemoAdmin {
    pub email: EmailAddress,
    pub password: Zeroizing<String>,
    pub full_name: String,
}

fn text(en: &str, ne: &str) -> LocalizedText {
    LocalizedText::new(en, Some(ne.to_owned()))
}

struct Question {
    question: (&'static str, &'static str),
    options: [(&'static str, &'static str); 4],
    correct: AnswerKey,
    kind: McqKind,
}

const EARTHQUAKE_QUESTIONS: [Question; 4] = [
    Question {
        question: ("What should you do first when shaking starts?", "कम्पन सुरु हुँदा पहिले के गर्नुपर्छ?"),
        options: [
            ("Drop, cover and hold on", "घुँडा टेक्ने, छोप्ने र समात्ने"),
            ("Run outside", "बाहिर दौडिने"),
            ("Use the lift", "लिफ्ट प्रयोग गर्ने"),
            ("Stand by a window", "झ्यालको छेउमा उभिने"),
        ],
        correct: AnswerKey::A,
        kind: McqKind::Introductory,
    },
    Question {
        question: ("Where is the safest place indoors?", "घरभित्र सबैभन्दा सुरक्षित ठाउँ कुन हो?"),
        options: [
            ("Next to a bookshelf", "दराजको छेउ"),
            ("Under a sturdy table", "बलियो टेबलमुनि"),
            ("In a doorway with glass", "सिसा भएको ढोका"),
            ("On the balcony", "बरन्डामा"),
        ],
        correct: AnswerKey::B,
        kind: McqKind::Assessment,
    },
    Question {
        question: ("What belongs in a go-bag?", "आपतकालीन झोलामा के राख्नुपर्छ?"),
        options: [
            ("Television", "टेलिभिजन"),
            ("Board games", "खेलौना"),
            ("Water, torch and first-aid kit", "पानी, टर्च र प्राथमिक उपचार सामग्री"),
            ("Nothing", "केही पनि होइन"),
        ],
        correct: AnswerKey::C,
        kind: McqKind::Assessment,
    },
    Question {
        question: ("After the shaking stops you should", "कम्पन रोकिएपछि तपाईंले"),
        options: [
            ("Light a match to check for gas", "ग्यास जाँच्न सलाई बाल्ने"),
            ("Go back inside immediately", "तुरुन्तै भित्र फर्किने"),
            ("Call everyone on the phone", "सबैलाई फोन गर्ने"),
            ("Move to an open area and check for injuries", "खुला ठाउँमा गएर घाइते जाँच्ने"),
        ],
        correct: AnswerKey::D,
        kind: McqKind::Assessment,
    },
];

fn question_rows(lesson_id: LessonId, questions: &[Question]) -> Vec<Mcq> {
    questions
        .iter()
        .zip(1..)
        .map(|(question, position)| Mcq {
            id: McqId::random(),
            lesson_id,
            question: text(question.question.0, question.question.1),
            options: question.options.map(|(en, ne)| text(en, ne)),
            correct: question.correct,
            kind: question.kind,
            position,
        })
        .collect()
}

fn seed_catalogue(tables: &mut Tables, now: DateTime<Utc>) {
    let course = Course {
        id: CourseId::random(),
        slug: "earthquake-preparedness".to_owned(),
        title: text("Earthquake preparedness", "भूकम्प पूर्वतयारी"),
        description: text(
            "Protect yourself and your family before, during and after an earthquake.",
            "भूकम्प अघि, भूकम्पको बेला र पछि आफू र परिवारलाई सुरक्षित राख्नुहोस्।",
        ),
        level: CourseLevel::Beginner,
        published: true,
        created_by: None,
        created_at: now - Duration::days(30),
    };
    let module = CourseModule {
        id: ModuleId::random(),
        course_id: course.id,
        title: text("Staying safe", "सुरक्षित रहनुहोस्"),
        position: 1,
    };
    let during = Lesson {
        id: LessonId::random(),
        module_id: module.id,
        title: text("During the shaking", "कम्पनको बेला"),
        content: text(
            "Drop to your hands and knees, cover your head and hold on until the shaking stops.",
            "घुँडा टेक्नुहोस्, टाउको छोप्नुहोस् र कम्पन नरोकिएसम्म समातिरहनुहोस्।",
        ),
        video_url: None,
        position: 1,
    };
    let after = Lesson {
        id: LessonId::random(),
        module_id: module.id,
        title: text("After the shaking", "कम्पनपछि"),
        content: text(
            "Check for injuries, expect aftershocks and move to an open space.",
            "घाइते जाँच्नुहोस्, पराकम्पनको लागि तयार रहनुहोस् र खुला ठाउँमा जानुहोस्।",
        ),
        video_url: None,
        position: 2,
    };
    let checklist = Resource {
        id: ResourceId::random(),
        title: text("Go-bag checklist", "आपतकालीन झोलाको सूची"),
        description: text("A printable list of essentials.", "छाप्न मिल्ने आवश्यक सामग्रीको सूची।"),
        file_url: "https://files.eduwarn.org.np/go-bag-checklist.pdf".to_owned(),
        lesson_id: Some(during.id),
        created_at: now - Duration::days(20),
    };
    tables.mcqs.extend(question_rows(during.id, &EARTHQUAKE_QUESTIONS));
    tables.resources.push(checklist);
    tables.lessons.extend([during, after]);
    tables.modules.push(module);
    tables.courses.push(course);
}

fn seed_community(tables: &mut Tables, now: DateTime<Utc>) {
    tables.categories.extend([
        ForumCategory {
            id: ForumCategoryId::random(),
            name: text("Preparedness", "पूर्वतयारी"),
            description: text("Plans, drills and supplies.", "योजना, अभ्यास र सामग्री।"),
            position: 1,
        },
        ForumCategory {
            id: ForumCategoryId::random(),
            name: text("Community stories", "समुदायका कथाहरू"),
            description: text("Share what worked for you.", "तपाईंलाई काम लागेको कुरा बाँड्नुहोस्।"),
            position: 2,
        },
    ]);
    tables.articles.push(BlogArticle {
        id: ArticleId::random(),
        slug: "monsoon-landslide-signs".to_owned(),
        title: text("Landslide warning signs", "पहिरोका चेतावनी संकेतहरू"),
        summary: text("What to watch for during the monsoon.", "मनसुनमा ध्यान दिनुपर्ने कुराहरू।"),
        body: text(
            "New cracks in the ground, tilting trees and muddy springs can signal a landslide.",
            "जमिनमा नयाँ चिरा, ढल्किएका रुख र धमिलो मूल पहिरोको संकेत हुन सक्छन्।",
        ),
        cover_image_url: None,
        author_id: None,
        published: true,
        published_at: Some(now - Duration::days(3)),
        created_at: now - Duration::days(4),
    });
}

fn seed_site_content(tables: &mut Tables) {
    tables.testimonials.push(Testimonial {
        id: Uuid::new_v4(),
        author_name: "Sunita Tamang".to_owned(),
        author_role: text("Teacher, Sindhupalchok", "शिक्षिका, सिन्धुपाल्चोक"),
        quote: text(
            "Our school now runs an earthquake drill every month.",
            "हाम्रो विद्यालयले अब हरेक महिना भूकम्प अभ्यास गर्छ।",
        ),
        approved: true,
        position: 1,
    });
    tables.statistics.extend([
        Statistic {
            id: Uuid::new_v4(),
            label: text("Learners reached", "पुगेका विद्यार्थी"),
            value: "12,000+".to_owned(),
            position: 1,
        },
        Statistic {
            id: Uuid::new_v4(),
            label: text("Districts", "जिल्लाहरू"),
            value: "42".to_owned(),
            position: 2,
        },
    ]);
    tables.quotes.extend([
        Quote {
            id: Uuid::new_v4(),
            text: text("Preparedness saves lives.", "पूर्वतयारीले जीवन बचाउँछ।"),
            author: "EduWarn Nepal".to_owned(),
        },
        Quote {
            id: Uuid::new_v4(),
            text: text("An informed community is a resilient community.", "सुसूचित समुदाय नै सबल समुदाय हो।"),
            author: "EduWarn Nepal".to_owned(),
        },
    ]);
}

impl InMemoryStore {
    /// Store pre-filled with a published course, forum categories, a blog
    /// article and site content, plus `admin` when given.
    ///
    /// # Errors
    ///
    /// Fails when the store lock is poisoned.
    pub fn with_demo_content(
        now: DateTime<Utc>,
        admin: Option<&DemoAdmin>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut tables = store.lock()?;
            seed_catalogue(&mut tables, now);
            seed_community(&mut tables, now);
            seed_site_content(&mut tables);
            if let Some(demo) = admin {
                let id = register(&mut tables, &demo.email, &demo.password)
                    .map_err(|error| StoreError::conflict(error.to_string()))?;
                let mut profile =
                    Profile::new_signup(id, &demo.email, demo.full_name.clone(), Role::Admin, now);
                profile.role_approved = true;
                tables.profiles.push(profile);
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{AuthGateway, CatalogueRepository, ProfileRepository};
    use crate::domain::LoginCredentials;

    #[tokio::test]
    async fn demo_course_is_published_with_two_lessons() {
        let store = InMemoryStore::with_demo_content(Utc::now(), None).expect("seeded");
        let course = store
            .find_course_by_slug("earthquake-preparedness")
            .await
            .expect("lookup")
            .expect("course");
        assert!(course.published);
        assert_eq!(course.title.resolve(crate::domain::Language::Ne), "भूकम्प पूर्वतयारी");
        let modules = store.list_modules(&course.id).await.expect("modules");
        let ids: Vec<ModuleId> = modules.iter().map(|module| module.id).collect();
        assert_eq!(store.list_lessons(&ids).await.expect("lessons").len(), 2);
    }

    #[tokio::test]
    async fn demo_admin_can_sign_in_and_is_approved() {
        let admin = DemoAdmin {
            email: EmailAddress::parse("email", "admin@eduwarn.test").expect("email"),
            password: Zeroizing::new("admin-pass".to_owned()),
            full_name: "Site Admin".to_owned(),
        };
        let store = InMemoryStore::with_demo_content(Utc::now(), Some(&admin)).expect("seeded");
        let credentials =
            LoginCredentials::try_from_parts("admin@eduwarn.test", "admin-pass").expect("creds");
        let id = store.sign_in(&credentials).await.expect("signed in");
        let profile = ProfileRepository::find(&store, &id)
            .await
            .expect("lookup")
            .expect("profile");
        assert!(profile.is_admin());
    }
}
