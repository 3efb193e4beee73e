use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Meal {
    Table,
    Id,
    Title,
    Description,
    Ingredients,
    PrepTimeMinutes,
    CookTimeMinutes,
    Effort,
    ImageUrl,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    WeekStart,
    DayNotes,
}

#[derive(Iden, Clone)]
pub enum MealPlanEntry {
    Table,
    Id,
    MealPlanId,
    MealId,
    DayOfWeek,
    MealType,
    DisplayOrder,
    AssignedCookId,
}

#[derive(Iden, Clone)]
pub enum Person {
    Table,
    Id,
    Name,
    EatingPreferences,
    CookingPreferences,
}

#[derive(Iden, Clone)]
pub enum MealRating {
    Table,
    Id,
    MealId,
    PersonId,
    Rating,
    Comment,
    RatedDate,
}
