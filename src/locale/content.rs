//! Message texts. HTML markup targets Telegram's `HTML` parse mode.
//!
//! Brand values are escaped and substituted here, once. The only placeholder
//! left for render time is `{name}` in the phone prompt.

use super::catalog::{MessageKey, escape_html};
use crate::config::BrandConfig;
use crate::conversation::Language;

pub const LANGUAGE_OPTIONS: [&str; 4] = ["English (EN)", "فارسی (FA)", "العربية (AR)", "Русский (RU)"];

/// Main-menu quick replies. Order: Services, Platform, Contact, Booking, Catalog.
pub fn menu_options(lang: Language) -> &'static [&'static str; 5] {
    match lang {
        Language::En => &[
            "Our Services (Web, SEO, AI)",
            "Artin SmartAgent Platform",
            "About CEO & Contact",
            "Book Consultation",
            "Get Catalog",
        ],
        Language::Fa => &[
            "خدمات ما (طراحی وب، سئو، AI)",
            "پلتفرم هوشمند آرتین",
            "درباره مدیرعامل و تماس",
            "رزرو مشاوره",
            "دریافت کاتالوگ",
        ],
        Language::Ar => &[
            "خدماتنا (ويب، سيو، ذكاء اصطناعي)",
            "منصة آرتين الذكية",
            "المدير التنفيذي والاتصال",
            "حجز استشارة",
            "تحميل الكتالوج",
        ],
        Language::Ru => &[
            "Услуги (Web, SEO, AI)",
            "Платформа Artin Smart",
            "О CEO и Контакты",
            "Забронировать встречу",
            "Скачать каталог",
        ],
    }
}

/// All (key, language, text) entries for a brand.
pub fn entries(brand: &BrandConfig) -> Vec<(MessageKey, Language, String)> {
    use Language::*;
    use MessageKey::*;

    let company = escape_html(&brand.company_name);
    let booking = escape_html(&brand.booking_url);
    let catalog = escape_html(&brand.catalog_url);
    let report = escape_html(&brand.report_url);
    let platform = escape_html(brand.platform_site());

    let mut out = vec![
        (
            Welcome,
            En,
            format!(
                "Welcome to <b>{company}</b> 🌐\n\
                 Your 24/7 Digital Marketing &amp; AI Partner.\n\n\
                 Please choose a language / لطفاً زبان خود را انتخاب کنید:"
            ),
        ),
        (
            LanguagePrompt,
            En,
            "Please select a language / لطفاً زبان خود را انتخاب کنید:".to_string(),
        ),
        (NamePrompt, En, "Thank you. Please enter your Full Name:".to_string()),
        (NamePrompt, Fa, "ممنون. لطفاً نام و نام خانوادگی خود را وارد کنید:".to_string()),
        (NamePrompt, Ar, "شكراً. الرجاء إدخال اسمك الكامل:".to_string()),
        (NamePrompt, Ru, "Спасибо. Пожалуйста, введите ваше полное имя:".to_string()),
        (
            PhonePrompt,
            En,
            "Nice to meet you, {name}. To assist you better, please share your WhatsApp number:"
                .to_string(),
        ),
        (
            PhonePrompt,
            Fa,
            "خوشبختم {name}. برای راهنمایی بهتر، لطفاً شماره واتساپ خود را ارسال کنید:".to_string(),
        ),
        (
            PhonePrompt,
            Ar,
            "تشرفنا {name}. لخدمتك بشكل أفضل، يرجى مشاركة رقم الواتساب:".to_string(),
        ),
        (
            PhonePrompt,
            Ru,
            "Приятно познакомиться, {name}. Пожалуйста, укажите ваш номер WhatsApp:".to_string(),
        ),
        (
            RegistrationComplete,
            En,
            "Registration Complete! How can we help you expand your business?".to_string(),
        ),
        (
            RegistrationComplete,
            Fa,
            "ثبت نام تکمیل شد! چگونه می‌توانیم به رشد کسب‌وکار شما کمک کنیم؟".to_string(),
        ),
        (
            RegistrationComplete,
            Ar,
            "اكتمل التسجيل! كيف يمكننا مساعدتك في توسيع نطاق عملك؟".to_string(),
        ),
        (
            RegistrationComplete,
            Ru,
            "Регистрация завершена! Как мы можем помочь вашему бизнесу?".to_string(),
        ),
        (
            Services,
            En,
            "🚀 <b>AMHR Digital Services:</b>\n\n\
             ✅ <b>Web Design &amp; SEO:</b> High-performance websites tailored for global reach.\n\
             ✅ <b>Digital Marketing:</b> Strategic campaigns to boost your ROI.\n\
             ✅ <b>Custom AI Agents:</b> Designing dedicated AI agents for your business automation."
                .to_string(),
        ),
        (
            Services,
            Fa,
            "🚀 <b>خدمات دیجیتال مارکتینگ AMHR:</b>\n\n\
             ✅ <b>طراحی وب و سئو:</b> وب‌سایت‌های با کارایی بالا برای بازارهای جهانی.\n\
             ✅ <b>دیجیتال مارکتینگ:</b> کمپین‌های استراتژیک برای افزایش بازدهی.\n\
             ✅ <b>ایجنت‌های هوش مصنوعی:</b> طراحی ایجنت‌های AI اختصاصی برای اتوماسیون کسب‌وکار شما."
                .to_string(),
        ),
        (
            Services,
            Ar,
            "🚀 <b>خدمات AMHR الرقمية:</b>\n\n\
             ✅ <b>تصميم المواقع و SEO:</b> مواقع عالية الأداء للوصول العالمي.\n\
             ✅ <b>التسويق الرقمي:</b> حملات استراتيجية لزيادة العائد على الاستثمار.\n\
             ✅ <b>وكلاء الذكاء الاصطناعي:</b> تصميم وكلاء AI مخصصين لأتمتة أعمالك."
                .to_string(),
        ),
        (
            Services,
            Ru,
            "🚀 <b>Цифровые услуги AMHR:</b>\n\n\
             ✅ <b>Веб-дизайн и SEO:</b> Высокопроизводительные сайты.\n\
             ✅ <b>Цифровой маркетинг:</b> Стратегические кампании.\n\
             ✅ <b>ИИ-агенты:</b> Разработка пользовательских ИИ-агентов."
                .to_string(),
        ),
        (
            Platform,
            En,
            format!(
                "🤖 <b>Artin SmartAgent Platform</b>\n\
                 <i>Performance &amp; Modularity Report</i>\n\n\
                 A multi-tenant SaaS solution built on <b>Microservices</b>, <b>FastAPI</b>, and <b>Next.js 14</b>.\n\n\
                 🔹 <b>Core Modules:</b>\n\
                 1️⃣ <b>Artin Expo Smart:</b> For exhibition management.\n\
                 2️⃣ <b>Artin Realty Smart:</b> Real estate automation.\n\
                 3️⃣ <b>Artin Clinic Smart:</b> Healthcare management.\n\
                 4️⃣ <b>Artin Influencer Smart:</b> Campaign orchestration.\n\n\
                 🚀 <b>Key Features:</b>\n\
                 - Secure Integrations (PayPal, Twilio)\n\
                 - Advanced Observability (Grafana, OpenTelemetry)\n\
                 - Full Customer Journey Automation\n\n\
                 🔗 <b><a href=\"{platform}\">Visit Platform Website</a></b>"
            ),
        ),
        (
            Platform,
            Fa,
            format!(
                "🤖 <b>پلتفرم هوشمند Artin SmartAgent</b>\n\n\
                 یک راهکار SaaS چند مستاجری مبتنی بر <b>Microservices</b> و تکنولوژی‌های مدرن.\n\n\
                 🔹 <b>ماژول‌های اصلی:</b>\n\
                 1️⃣ <b>Artin Expo Smart:</b> مدیریت نمایشگاهی.\n\
                 2️⃣ <b>Artin Realty Smart:</b> اتوماسیون املاک.\n\
                 3️⃣ <b>Artin Clinic Smart:</b> مدیریت کلینیک.\n\
                 4️⃣ <b>Artin Influencer Smart:</b> مدیریت کمپین‌ها.\n\n\
                 🔗 <b><a href=\"{platform}\">مشاهده وبسایت پلتفرم</a></b>"
            ),
        ),
        (
            Booking,
            En,
            format!(
                "📅 <b>Book a Consultation:</b>\n\
                 Schedule a meeting with our experts directly via Calendly:\n\n\
                 👉 <a href=\"{booking}\">Click here to Book</a>"
            ),
        ),
        (
            Booking,
            Fa,
            format!(
                "📅 <b>رزرو مشاوره:</b>\n\
                 برای تنظیم وقت جلسه با متخصصین ما از طریق لینک زیر اقدام کنید:\n\n\
                 👉 <a href=\"{booking}\">برای رزرو کلیک کنید</a>"
            ),
        ),
        (
            Booking,
            Ar,
            format!(
                "📅 <b>حجز استشارة:</b>\n\
                 حدد موعداً مع خبرائنا مباشرة:\n\n\
                 👉 <a href=\"{booking}\">اضغط هنا للحجز</a>"
            ),
        ),
        (
            Booking,
            Ru,
            format!(
                "📅 <b>Забронировать консультацию:</b>\n\
                 Запишитесь на встречу через Calendly:\n\n\
                 👉 <a href=\"{booking}\">Нажмите здесь</a>"
            ),
        ),
        (
            Catalog,
            En,
            format!(
                "📥 <b>Download Center:</b>\n\n\
                 1. <a href=\"{catalog}\">AMHR Company Services Catalog</a>\n\
                 2. <a href=\"{report}\">Artin SmartAgent Performance Report</a>"
            ),
        ),
        (
            Catalog,
            Fa,
            format!(
                "📥 <b>مرکز دانلود:</b>\n\n\
                 1. <a href=\"{catalog}\">کاتالوگ خدمات شرکت AMHR</a>\n\
                 2. <a href=\"{report}\">گزارش عملکرد پلتفرم آرتین</a>"
            ),
        ),
        (
            Catalog,
            Ar,
            format!(
                "📥 <b>مركز التحميل:</b>\n\n\
                 1. <a href=\"{catalog}\">كتالوج خدمات AMHR</a>\n\
                 2. <a href=\"{report}\">تقرير أداء منصة آرتين</a>"
            ),
        ),
        (
            Catalog,
            Ru,
            format!(
                "📥 <b>Центр загрузки:</b>\n\n\
                 1. <a href=\"{catalog}\">Каталог услуг AMHR</a>\n\
                 2. <a href=\"{report}\">Отчет о платформе Artin</a>"
            ),
        ),
        (MenuFallback, En, "Please select an option from the menu.".to_string()),
        (MenuFallback, Fa, "لطفاً یکی از گزینه‌های منو را انتخاب کنید.".to_string()),
        (MenuFallback, Ar, "الرجاء اختيار خيار من القائمة.".to_string()),
        (MenuFallback, Ru, "Пожалуйста, выберите опцию из меню.".to_string()),
        (RestartHint, En, "Type /start to restart.".to_string()),
    ];

    out.extend(Language::ALL.map(|lang| (Contact, lang, contact_card(brand, lang))));
    out
}

/// The contact card is English everywhere except for the CEO title.
fn contact_card(brand: &BrandConfig, lang: Language) -> String {
    let websites: String = brand
        .websites
        .iter()
        .map(|site| format!("\n• {}", escape_html(site)))
        .collect();

    format!(
        "👤 <b>{ceo}</b>\n\
         <i>{title}</i>\n\n\
         📍 <b>Address:</b> {address}\n\
         🔗 <a href=\"{map}\">View on Google Maps</a>\n\n\
         💼 <b>LinkedIn:</b> <a href=\"{linkedin}\">View Profile</a>\n\n\
         🌐 <b>Websites:</b>{websites}",
        ceo = escape_html(&brand.ceo_name),
        title = escape_html(brand.ceo_title_for(lang)),
        address = escape_html(&brand.address),
        map = escape_html(&brand.map_url),
        linkedin = escape_html(&brand.linkedin_url),
    )
}
