//! Built-in marketing content shown when the API has nothing to offer.

use super::{MemberCard, ProjectCard, ServiceCard};
use crate::models::ProjectCategory;

pub fn projects() -> Vec<ProjectCard> {
    vec![
        ProjectCard {
            id: None,
            title: "Modern Residential Complex".to_string(),
            category: ProjectCategory::Residential,
            description: "Contemporary multi-story residential building with modern architectural \
                          elements and sustainable design features."
                .to_string(),
            location: "Kigali, Rwanda".to_string(),
            image: "/static/images/hero-engineering.jpg".to_string(),
        },
        ProjectCard {
            id: None,
            title: "Commercial Office Complex".to_string(),
            category: ProjectCategory::Commercial,
            description: "Multi-story commercial building with brick facade and glass elements, \
                          designed for optimal workspace functionality."
                .to_string(),
            location: "Kigali, Rwanda".to_string(),
            image: "/static/images/project-commercial-building-2.jpg".to_string(),
        },
    ]
}

pub fn team() -> Vec<MemberCard> {
    [
        (
            "Lead Engineer",
            "Certified Civil Engineer",
            "Expert in structural design and project execution",
        ),
        (
            "Yves NDACYAYISENGA",
            "Operations Manager",
            "Strategic leadership and business development",
        ),
        (
            "Site QS",
            "Quality Surveyor",
            "Quantity surveying and quality assurance specialist",
        ),
        (
            "Evariste DUSABIMANA",
            "Structural Engineer",
            "Advanced structural analysis and design expert",
        ),
        (
            "Accountant",
            "Financial Management",
            "Financial planning and project cost management",
        ),
    ]
    .into_iter()
    .map(|(name, role, description)| MemberCard {
        name: name.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        image: "/static/images/team-leader.jpg".to_string(),
    })
    .collect()
}

pub fn services() -> Vec<ServiceCard> {
    let service = |title: &str, description: &str, features: [&str; 4]| ServiceCard {
        title: title.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    };

    vec![
        service(
            "All Civil Related Works Design & Construction",
            "Comprehensive civil engineering solutions including design, analysis, and construction \
             of infrastructure projects with meticulous attention to detail and quality.",
            [
                "Infrastructure Design",
                "Project Management",
                "Quality Assurance",
                "Site Supervision",
            ],
        ),
        service(
            "Road Design & Construction",
            "Expert highway and public infrastructure development including road design, \
             construction supervision, and maintenance planning for durable transportation networks.",
            [
                "Highway Design",
                "Traffic Engineering",
                "Pavement Analysis",
                "Construction Management",
            ],
        ),
        service(
            "House Design & Construction",
            "Custom residential design and construction services from concept to completion, \
             ensuring your dream home meets the highest standards of quality and sustainability.",
            [
                "Architectural Design",
                "Interior Planning",
                "Construction Supervision",
                "Quality Control",
            ],
        ),
        service(
            "Engineering Software Trainings",
            "Professional training programs in industry-standard engineering software to enhance \
             your team's technical capabilities and project efficiency.",
            [
                "CAD Training",
                "Structural Software",
                "GIS Training",
                "Professional Certification",
            ],
        ),
        service(
            "Structural Analysis",
            "Advanced structural analysis and engineering solutions using cutting-edge software and \
             methodologies to ensure safety, efficiency, and compliance.",
            [
                "Load Analysis",
                "Seismic Design",
                "Foundation Design",
                "Structural Optimization",
            ],
        ),
        service(
            "GIS & Remote Sensing",
            "Geographic Information Systems and remote sensing services for spatial analysis, \
             mapping, and data-driven decision making in engineering projects.",
            [
                "Spatial Analysis",
                "Land Surveying",
                "Environmental Mapping",
                "Data Visualization",
            ],
        ),
        service(
            "Interior Design",
            "Professional interior design services that transform spaces into functional, aesthetic \
             environments that reflect your vision and enhance user experience.",
            [
                "Space Planning",
                "Material Selection",
                "Lighting Design",
                "Project Coordination",
            ],
        ),
        service(
            "Landscape Architecture",
            "Sustainable landscape design solutions that harmonize natural elements with built \
             environments for enhanced aesthetics and functionality.",
            [
                "Site Planning",
                "Environmental Design",
                "Sustainable Solutions",
                "Maintenance Planning",
            ],
        ),
    ]
}
